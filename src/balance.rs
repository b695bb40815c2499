// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Account balance engine.
//!
//! `recompute` rebuilds an account's balance from its baseline plus the net
//! effect of every confirmed transaction touching it; `adjust` applies a single
//! delta when one freshly confirmed transaction is all that changed. Anything
//! that can invalidate more than one transaction at once (edits, deletes,
//! reassignment) must go through the full recompute.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::ledger;
use crate::models::{Account, AccountKind, CreditCardDetails, TxKind};
use crate::money::to_cents;

const ACCOUNT_COLS: &str = "id, user_id, name, type, balance, baseline_balance, currency, \
                            credit_limit, statement_balance, closing_day, due_day, is_active, \
                            include_in_total";

pub(crate) fn account_from_row(r: &Row) -> rusqlite::Result<Account> {
    let kind: String = r.get(3)?;
    let kind = AccountKind::parse(&kind).map_err(|e| conv_err(3, e))?;
    let balance: String = r.get(4)?;
    let baseline: String = r.get(5)?;
    let credit_limit: Option<String> = r.get(7)?;
    let statement_balance: String = r.get(8)?;
    let credit_card = if kind == AccountKind::CreditCard {
        Some(CreditCardDetails {
            credit_limit: credit_limit
                .map(|s| s.parse().map_err(|e| conv_err(7, anyhow::Error::new(e))))
                .transpose()?,
            statement_balance: statement_balance
                .parse()
                .map_err(|e| conv_err(8, anyhow::Error::new(e)))?,
            closing_day: r.get(9)?,
            due_day: r.get(10)?,
        })
    } else {
        None
    };
    Ok(Account {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        kind,
        balance: balance.parse().map_err(|e| conv_err(4, anyhow::Error::new(e)))?,
        baseline_balance: baseline.parse().map_err(|e| conv_err(5, anyhow::Error::new(e)))?,
        currency: r.get(6)?,
        is_active: r.get(11)?,
        include_in_total: r.get(12)?,
        credit_card,
    })
}

fn conv_err(idx: usize, e: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
}

pub fn load(conn: &Connection, id: i64) -> Result<Option<Account>> {
    let sql = format!("SELECT {ACCOUNT_COLS} FROM accounts WHERE id=?1 AND deleted_at IS NULL");
    let acct = conn
        .query_row(&sql, params![id], account_from_row)
        .optional()
        .with_context(|| format!("Load account {}", id))?;
    Ok(acct)
}

pub fn load_all(conn: &Connection, user_id: i64) -> Result<Vec<Account>> {
    let sql = format!(
        "SELECT {ACCOUNT_COLS} FROM accounts
         WHERE user_id=?1 AND deleted_at IS NULL ORDER BY name"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], account_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Persist a balance without touching anything else. Deliberately writes one
/// column so a recompute can never cascade back into the lifecycle coordinator.
fn save_balance(conn: &Connection, account_id: i64, balance: Decimal) -> Result<()> {
    conn.execute(
        "UPDATE accounts SET balance=?2 WHERE id=?1",
        params![account_id, balance.to_string()],
    )
    .with_context(|| format!("Persist balance for account {}", account_id))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

/// Full recompute from the confirmed transaction set:
///
/// ```text
/// balance = baseline + income - expenses - transfers_out + transfers_in
/// ```
///
/// Pending transactions never participate. A missing account is a no-op
/// (soft deletion can leave dangling references behind).
pub fn recompute(conn: &Connection, account_id: i64) -> Result<Option<Decimal>> {
    let Some(account) = load(conn, account_id)? else {
        return Ok(None);
    };
    let income = ledger::confirmed_kind_sum(conn, account_id, TxKind::Income)?;
    let expenses = ledger::confirmed_kind_sum(conn, account_id, TxKind::Expense)?;
    let transfers_out = ledger::confirmed_kind_sum(conn, account_id, TxKind::Transfer)?;
    let transfers_in = ledger::incoming_transfer_sum(conn, account_id)?;

    let balance =
        to_cents(account.baseline_balance + income - expenses - transfers_out + transfers_in);
    save_balance(conn, account_id, balance)?;
    Ok(Some(balance))
}

/// Single-delta fast path for a freshly confirmed transaction at creation time.
pub fn adjust(
    conn: &Connection,
    account_id: i64,
    amount: Decimal,
    direction: Direction,
) -> Result<Option<Decimal>> {
    let Some(account) = load(conn, account_id)? else {
        return Ok(None);
    };
    let balance = match direction {
        Direction::Credit => to_cents(account.balance + amount),
        Direction::Debit => to_cents(account.balance - amount),
    };
    save_balance(conn, account_id, balance)?;
    Ok(Some(balance))
}

/// Manual balance edit: the new value becomes the baseline and the stored
/// balance is rebuilt on top of it.
pub fn rebaseline(conn: &Connection, account_id: i64, amount: Decimal) -> Result<Option<Decimal>> {
    conn.execute(
        "UPDATE accounts SET baseline_balance=?2 WHERE id=?1 AND deleted_at IS NULL",
        params![account_id, to_cents(amount).to_string()],
    )
    .with_context(|| format!("Set baseline for account {}", account_id))?;
    recompute(conn, account_id)
}

/// Net worth figure for the dashboard: active accounts flagged
/// `include_in_total`.
pub fn total_balance(conn: &Connection, user_id: i64) -> Result<Decimal> {
    let mut stmt = conn.prepare(
        "SELECT balance FROM accounts
         WHERE user_id=?1 AND is_active=1 AND include_in_total=1 AND deleted_at IS NULL",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        total += s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid balance '{}' in accounts", s))?;
    }
    Ok(total)
}
