// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Debt amortization engine: remaining-balance tracking against confirmed
//! payments, the two monthly-payment strategies (equal installments vs.
//! remaining-over-time), and next-payment-date projection.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::ledger;
use crate::models::{Debt, DebtKind};
use crate::money::{display_pct, pct_of, to_cents};
use crate::utils::{clamp_day, whole_months_between};

const DEBT_COLS: &str = "id, user_id, name, type, account_id, total_amount, remaining_amount, \
                         monthly_payment, start_date, end_date, due_day, total_installments, \
                         closed_at, notes";

pub(crate) fn debt_from_row(r: &Row) -> rusqlite::Result<Debt> {
    let kind: String = r.get(3)?;
    let total: String = r.get(5)?;
    let remaining: String = r.get(6)?;
    let monthly: Option<String> = r.get(7)?;
    Ok(Debt {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        kind: DebtKind::parse(&kind).map_err(|e| conv_err(3, e))?,
        account_id: r.get(4)?,
        total_amount: total.parse().map_err(|e| conv_err(5, anyhow::Error::new(e)))?,
        remaining_amount: remaining.parse().map_err(|e| conv_err(6, anyhow::Error::new(e)))?,
        monthly_payment: monthly
            .map(|s| s.parse().map_err(|e| conv_err(7, anyhow::Error::new(e))))
            .transpose()?,
        start_date: r.get(8)?,
        end_date: r.get(9)?,
        due_day: r.get(10)?,
        total_installments: r.get(11)?,
        closed_at: r.get(12)?,
        notes: r.get(13)?,
    })
}

fn conv_err(idx: usize, e: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
}

pub fn load(conn: &Connection, id: i64) -> Result<Option<Debt>> {
    let sql = format!("SELECT {DEBT_COLS} FROM debts WHERE id=?1 AND deleted_at IS NULL");
    let debt = conn
        .query_row(&sql, params![id], debt_from_row)
        .optional()
        .with_context(|| format!("Load debt {}", id))?;
    Ok(debt)
}

pub fn load_all(conn: &Connection, user_id: i64) -> Result<Vec<Debt>> {
    let sql = format!("SELECT {DEBT_COLS} FROM debts WHERE user_id=?1 AND deleted_at IS NULL");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], debt_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    // TEXT columns don't order numerically in SQL, so sort here.
    out.sort_by(|a, b| b.remaining_amount.cmp(&a.remaining_amount));
    Ok(out)
}

/// Debts still carrying a balance, largest first.
pub fn load_active(conn: &Connection, user_id: i64) -> Result<Vec<Debt>> {
    let mut all = load_all(conn, user_id)?;
    all.retain(|d| d.remaining_amount > Decimal::ZERO);
    Ok(all)
}

/// Installment debts still open on one credit-card account.
pub fn active_for_account(conn: &Connection, account_id: i64) -> Result<Vec<Debt>> {
    let sql = format!(
        "SELECT {DEBT_COLS} FROM debts
         WHERE account_id=?1 AND type='credit_card' AND deleted_at IS NULL"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![account_id], debt_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        let d = r?;
        if d.remaining_amount > Decimal::ZERO {
            out.push(d);
        }
    }
    Ok(out)
}

/// Rederives `remaining_amount` from confirmed payments, floored at zero.
/// Hitting zero stamps `closed_at` once; going positive again clears it, so a
/// deleted or unconfirmed payment reopens the debt.
pub fn update_balance(
    conn: &Connection,
    debt_id: i64,
    now: NaiveDateTime,
) -> Result<Option<Decimal>> {
    let Some(debt) = load(conn, debt_id)? else {
        return Ok(None);
    };
    let paid = ledger::debt_paid_sum(conn, debt_id)?;
    let mut remaining = to_cents(debt.total_amount - paid);
    let closed_at = if remaining <= Decimal::ZERO {
        remaining = Decimal::ZERO;
        Some(debt.closed_at.unwrap_or(now))
    } else {
        None
    };
    conn.execute(
        "UPDATE debts SET remaining_amount=?2, closed_at=?3 WHERE id=?1",
        params![debt_id, remaining.to_string(), closed_at],
    )
    .with_context(|| format!("Persist balance for debt {}", debt_id))?;
    Ok(Some(remaining))
}

/// Equal-installment strategy: `total_amount / total_installments`, rounded
/// half-up to cents. The residual cent lands on the final installment; see
/// [`final_installment`]. No-op unless `total_installments` is set and positive.
pub fn calculate_monthly_payment(conn: &Connection, debt_id: i64) -> Result<Option<Decimal>> {
    let Some(debt) = load(conn, debt_id)? else {
        return Ok(None);
    };
    let Some(n) = debt.total_installments.filter(|n| *n > 0) else {
        return Ok(None);
    };
    let monthly = to_cents(debt.total_amount / Decimal::from(n));
    conn.execute(
        "UPDATE debts SET monthly_payment=?2 WHERE id=?1",
        params![debt_id, monthly.to_string()],
    )
    .with_context(|| format!("Persist monthly payment for debt {}", debt_id))?;
    Ok(Some(monthly))
}

/// What the last installment actually costs once the first `n-1` pay the
/// rounded amount: `total - monthly * (n - 1)`.
pub fn final_installment(debt: &Debt) -> Option<Decimal> {
    let n = debt.total_installments.filter(|n| *n > 0)?;
    let monthly = to_cents(debt.total_amount / Decimal::from(n));
    Some(to_cents(debt.total_amount - monthly * Decimal::from(n - 1)))
}

/// Remaining-over-time strategy: spread `remaining_amount` across the whole
/// months left until `end_date`, current month included and floored at one.
/// Past the end date the full remainder is due at once. No-op without an
/// `end_date`.
pub fn recalculate_monthly_payment(
    conn: &Connection,
    debt_id: i64,
    today: NaiveDate,
) -> Result<Option<Decimal>> {
    let Some(debt) = load(conn, debt_id)? else {
        return Ok(None);
    };
    let Some(end_date) = debt.end_date else {
        return Ok(None);
    };
    let monthly = if today >= end_date {
        debt.remaining_amount
    } else {
        let months = whole_months_between(today, end_date).max(0) + 1;
        to_cents(debt.remaining_amount / Decimal::from(months.max(1)))
    };
    conn.execute(
        "UPDATE debts SET monthly_payment=?2 WHERE id=?1",
        params![debt_id, monthly.to_string()],
    )
    .with_context(|| format!("Persist monthly payment for debt {}", debt_id))?;
    Ok(Some(monthly))
}

/// Next occurrence of `due_day`: this month while today's day hasn't passed it,
/// otherwise next month. Days beyond a month's length clamp to its last day.
pub fn next_payment_date(debt: &Debt, today: NaiveDate) -> Option<NaiveDate> {
    let due_day = debt.due_day?;
    if today.day() <= due_day {
        Some(clamp_day(today.year(), today.month(), due_day))
    } else {
        let (y, m) = if today.month() == 12 {
            (today.year() + 1, 1)
        } else {
            (today.year(), today.month() + 1)
        };
        Some(clamp_day(y, m, due_day))
    }
}

/// Share of the debt already paid off, as a 1-dp display percentage.
pub fn paid_percentage(debt: &Debt) -> Decimal {
    pct_of(debt.total_amount - debt.remaining_amount, debt.total_amount)
        .map(display_pct)
        .unwrap_or(Decimal::ZERO)
}
