// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction ledger: the set of posted and pending transactions, and the
//! confirmed-sum queries the balance, statement, and debt engines derive from.
//!
//! Amounts are stored as TEXT and summed in `Decimal` on the way out; SQLite's
//! own SUM would go through binary floats and drift at the cent level.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::models::{Transaction, TxKind};

const TX_COLS: &str = "id, user_id, account_id, category_id, transfer_to_account_id, debt_id, \
                       type, amount, description, notes, date, time, is_confirmed, is_recurring, \
                       recurring_frequency, recurring_end_date, reference, tags";

fn tx_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    let kind: String = r.get(6)?;
    let amount: String = r.get(7)?;
    let tags: Option<String> = r.get(17)?;
    Ok(Transaction {
        id: r.get(0)?,
        user_id: r.get(1)?,
        account_id: r.get(2)?,
        category_id: r.get(3)?,
        transfer_to_account_id: r.get(4)?,
        debt_id: r.get(5)?,
        kind: TxKind::parse(&kind).map_err(|e| conv_err(6, e))?,
        amount: amount.parse().map_err(|e| conv_err(7, anyhow::Error::new(e)))?,
        description: r.get(8)?,
        notes: r.get(9)?,
        date: r.get(10)?,
        time: r.get(11)?,
        is_confirmed: r.get(12)?,
        is_recurring: r.get(13)?,
        recurring_frequency: r.get(14)?,
        recurring_end_date: r.get(15)?,
        reference: r.get(16)?,
        tags: match tags {
            Some(t) => serde_json::from_str(&t).map_err(|e| conv_err(17, anyhow::Error::new(e)))?,
            None => Vec::new(),
        },
    })
}

fn conv_err(idx: usize, e: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let sql = format!("SELECT {TX_COLS} FROM transactions WHERE id=?1 AND deleted_at IS NULL");
    let tx = conn
        .query_row(&sql, params![id], tx_from_row)
        .optional()
        .with_context(|| format!("Load transaction {}", id))?;
    Ok(tx)
}

/// Inserts `tx` (its `id` is ignored) and returns the stored row.
pub fn insert(conn: &Connection, tx: &Transaction) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO transactions(user_id, account_id, category_id, transfer_to_account_id, \
         debt_id, type, amount, description, notes, date, time, is_confirmed, is_recurring, \
         recurring_frequency, recurring_end_date, reference, tags)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17)",
        params![
            tx.user_id,
            tx.account_id,
            tx.category_id,
            tx.transfer_to_account_id,
            tx.debt_id,
            tx.kind.as_str(),
            tx.amount.to_string(),
            tx.description,
            tx.notes,
            tx.date,
            tx.time,
            tx.is_confirmed,
            tx.is_recurring,
            tx.recurring_frequency,
            tx.recurring_end_date,
            tx.reference,
            if tx.tags.is_empty() { None } else { Some(serde_json::to_string(&tx.tags)?) },
        ],
    )
    .context("Insert transaction")?;
    let id = conn.last_insert_rowid();
    let mut stored = tx.clone();
    stored.id = id;
    Ok(stored)
}

/// Rewrites every mutable field of the row identified by `tx.id`.
pub fn update(conn: &Connection, tx: &Transaction) -> Result<()> {
    conn.execute(
        "UPDATE transactions SET account_id=?2, category_id=?3, transfer_to_account_id=?4, \
         debt_id=?5, type=?6, amount=?7, description=?8, notes=?9, date=?10, time=?11, \
         is_confirmed=?12, is_recurring=?13, recurring_frequency=?14, recurring_end_date=?15, \
         reference=?16, tags=?17
         WHERE id=?1 AND deleted_at IS NULL",
        params![
            tx.id,
            tx.account_id,
            tx.category_id,
            tx.transfer_to_account_id,
            tx.debt_id,
            tx.kind.as_str(),
            tx.amount.to_string(),
            tx.description,
            tx.notes,
            tx.date,
            tx.time,
            tx.is_confirmed,
            tx.is_recurring,
            tx.recurring_frequency,
            tx.recurring_end_date,
            tx.reference,
            if tx.tags.is_empty() { None } else { Some(serde_json::to_string(&tx.tags)?) },
        ],
    )
    .with_context(|| format!("Update transaction {}", tx.id))?;
    Ok(())
}

/// Soft delete; the row stays for history but drops out of every query.
pub fn soft_delete(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
        "UPDATE transactions SET deleted_at=datetime('now') WHERE id=?1 AND deleted_at IS NULL",
        params![id],
    )
    .with_context(|| format!("Delete transaction {}", id))?;
    Ok(())
}

/// Latest transactions for a user, newest first.
pub fn recent(conn: &Connection, user_id: i64, limit: u32) -> Result<Vec<Transaction>> {
    let sql = format!(
        "SELECT {TX_COLS} FROM transactions
         WHERE user_id=?1 AND deleted_at IS NULL
         ORDER BY date DESC, id DESC LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, limit], tx_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Sums the `amount` column of an arbitrary transaction query in `Decimal`.
fn sum_amounts<P: rusqlite::Params>(conn: &Connection, sql: &str, p: P) -> Result<Decimal> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(p)?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        total += s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", s))?;
    }
    Ok(total)
}

/// Confirmed transactions of one kind owned by the account.
pub fn confirmed_kind_sum(conn: &Connection, account_id: i64, kind: TxKind) -> Result<Decimal> {
    sum_amounts(
        conn,
        "SELECT amount FROM transactions
         WHERE account_id=?1 AND type=?2 AND is_confirmed=1 AND deleted_at IS NULL",
        params![account_id, kind.as_str()],
    )
}

/// Confirmed transfers arriving at the account.
pub fn incoming_transfer_sum(conn: &Connection, account_id: i64) -> Result<Decimal> {
    sum_amounts(
        conn,
        "SELECT amount FROM transactions
         WHERE transfer_to_account_id=?1 AND type='transfer' AND is_confirmed=1 AND deleted_at IS NULL",
        params![account_id],
    )
}

/// Confirmed payments linked to a debt.
pub fn debt_paid_sum(conn: &Connection, debt_id: i64) -> Result<Decimal> {
    sum_amounts(
        conn,
        "SELECT amount FROM transactions
         WHERE debt_id=?1 AND is_confirmed=1 AND deleted_at IS NULL",
        params![debt_id],
    )
}

/// Confirmed expenses on the account dated on/after `since`; the statement
/// engine runs this over the open billing cycle.
pub fn expense_sum_since(conn: &Connection, account_id: i64, since: NaiveDate) -> Result<Decimal> {
    sum_amounts(
        conn,
        "SELECT amount FROM transactions
         WHERE account_id=?1 AND type='expense' AND is_confirmed=1
           AND date>=?2 AND deleted_at IS NULL",
        params![account_id, since],
    )
}

/// Confirmed transactions of one kind across all of a user's accounts in a month.
pub fn monthly_kind_sum(
    conn: &Connection,
    user_id: i64,
    kind: TxKind,
    year: i32,
    month: u32,
) -> Result<Decimal> {
    let (start, end) = crate::utils::month_bounds(year, month);
    sum_amounts(
        conn,
        "SELECT amount FROM transactions
         WHERE user_id=?1 AND type=?2 AND is_confirmed=1
           AND date>=?3 AND date<?4 AND deleted_at IS NULL",
        params![user_id, kind.as_str(), start, end],
    )
}

/// Confirmed expense total for one category in a month; budget "spent" is
/// always derived live from here, never stored.
pub fn category_expense_sum(
    conn: &Connection,
    user_id: i64,
    category_id: i64,
    year: i32,
    month: u32,
) -> Result<Decimal> {
    let (start, end) = crate::utils::month_bounds(year, month);
    sum_amounts(
        conn,
        "SELECT amount FROM transactions
         WHERE user_id=?1 AND category_id=?2 AND type='expense' AND is_confirmed=1
           AND date>=?3 AND date<?4 AND deleted_at IS NULL",
        params![user_id, category_id, start, end],
    )
}
