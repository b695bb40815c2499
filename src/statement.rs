// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Credit-card statement engine: billing-cycle statement balances, available
//! credit, utilization, and the card's total monthly obligation.
//!
//! Reconciliation is on demand, not transaction-triggered; callers run it
//! before display or at a cycle boundary.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::balance;
use crate::debts;
use crate::ledger;
use crate::models::Account;
use crate::money::{display_pct, pct_of, to_cents};
use crate::utils::clamp_day;

/// Sum of `monthly_payment` over the card's open installment debts.
/// Zero for anything that isn't a credit card.
pub fn total_monthly_payment(conn: &Connection, account: &Account) -> Result<Decimal> {
    if account.credit_card.is_none() {
        return Ok(Decimal::ZERO);
    }
    let mut total = Decimal::ZERO;
    for debt in debts::active_for_account(conn, account.id)? {
        total += debt.monthly_payment.unwrap_or(Decimal::ZERO);
    }
    Ok(total)
}

/// Open installment balances plus the current statement balance (as a
/// magnitude): everything currently owed on the card.
pub fn total_outstanding_debt(conn: &Connection, account: &Account) -> Result<Decimal> {
    let Some(details) = &account.credit_card else {
        return Ok(Decimal::ZERO);
    };
    let mut total = Decimal::ZERO;
    for debt in debts::active_for_account(conn, account.id)? {
        total += debt.remaining_amount;
    }
    Ok(total + details.statement_balance.abs())
}

/// `credit_limit - outstanding`, or None when the card has no limit set.
pub fn available_credit(conn: &Connection, account: &Account) -> Result<Option<Decimal>> {
    let Some(details) = &account.credit_card else {
        return Ok(None);
    };
    let Some(limit) = details.credit_limit else {
        return Ok(None);
    };
    let used = total_outstanding_debt(conn, account)?;
    Ok(Some(to_cents(limit - used.abs())))
}

/// Outstanding debt as a share of the limit, 1-dp display percentage.
/// None when the limit is unset or zero.
pub fn credit_utilization(conn: &Connection, account: &Account) -> Result<Option<Decimal>> {
    let Some(details) = &account.credit_card else {
        return Ok(None);
    };
    let Some(limit) = details.credit_limit.filter(|l| !l.is_zero()) else {
        return Ok(None);
    };
    let used = total_outstanding_debt(conn, account)?;
    Ok(pct_of(used.abs(), limit).map(display_pct))
}

/// Start of the open billing cycle: `closing_day` of this month once today has
/// reached it, otherwise `closing_day` of the previous month.
pub fn cycle_start(closing_day: u32, today: NaiveDate) -> NaiveDate {
    if today.day() >= closing_day {
        clamp_day(today.year(), today.month(), closing_day)
    } else {
        let (y, m) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        clamp_day(y, m, closing_day)
    }
}

/// Recomputes and stores `statement_balance` for the open cycle: confirmed
/// expenses since the cycle start plus open installment balances, negated
/// (negative = amount owed). No-op unless the account is a credit card with a
/// closing day.
pub fn reconcile(conn: &Connection, account_id: i64, today: NaiveDate) -> Result<Option<Decimal>> {
    let Some(account) = balance::load(conn, account_id)? else {
        return Ok(None);
    };
    let Some(details) = &account.credit_card else {
        return Ok(None);
    };
    let Some(closing_day) = details.closing_day else {
        return Ok(None);
    };

    let since = cycle_start(closing_day, today);
    let expenses = ledger::expense_sum_since(conn, account_id, since)?;
    let mut installments = Decimal::ZERO;
    for debt in debts::active_for_account(conn, account_id)? {
        installments += debt.remaining_amount;
    }

    let statement = to_cents(-(expenses + installments));
    conn.execute(
        "UPDATE accounts SET statement_balance=?2 WHERE id=?1",
        params![account_id, statement.to_string()],
    )
    .with_context(|| format!("Persist statement balance for account {}", account_id))?;
    Ok(Some(statement))
}
