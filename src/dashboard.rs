// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-side dashboard aggregates: monthly totals, category breakdown,
//! 6-month trend, budget progress, and the commitment calendar inputs.
//! Everything is derived live from the ledger; nothing is stored back.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::balance;
use crate::calendar::{self, MonthlyCommitments};
use crate::debts;
use crate::ledger;
use crate::models::{FixedExpense, Transaction, TxKind};
use crate::money::{display_pct, pct_of};
use crate::utils::month_bounds;

#[derive(Debug, Serialize)]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

pub fn monthly_summary(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
) -> Result<MonthlySummary> {
    let income = ledger::monthly_kind_sum(conn, user_id, TxKind::Income, year, month)?;
    let expenses = ledger::monthly_kind_sum(conn, user_id, TxKind::Expense, year, month)?;
    Ok(MonthlySummary {
        income,
        expenses,
        savings: income - expenses,
    })
}

#[derive(Debug, Serialize)]
pub struct CategorySpend {
    pub category_id: Option<i64>,
    pub category_name: String,
    pub color: Option<String>,
    pub total: Decimal,
    pub count: u64,
}

/// Confirmed expenses for the month grouped per category, largest first.
/// Uncategorized spending is kept as its own bucket.
pub fn expenses_by_category(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
) -> Result<Vec<CategorySpend>> {
    let (start, end) = month_bounds(year, month);
    let mut stmt = conn.prepare(
        "SELECT t.category_id, c.name, c.color, t.amount
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.user_id=?1 AND t.type='expense' AND t.is_confirmed=1
           AND t.date>=?2 AND t.date<?3 AND t.deleted_at IS NULL",
    )?;
    let mut rows = stmt.query(params![user_id, start, end])?;

    let mut buckets: Vec<CategorySpend> = Vec::new();
    while let Some(r) = rows.next()? {
        let category_id: Option<i64> = r.get(0)?;
        let name: Option<String> = r.get(1)?;
        let color: Option<String> = r.get(2)?;
        let amount: String = r.get(3)?;
        let amount: Decimal = amount
            .parse()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount))?;
        match buckets.iter_mut().find(|b| b.category_id == category_id) {
            Some(b) => {
                b.total += amount;
                b.count += 1;
            }
            None => buckets.push(CategorySpend {
                category_id,
                category_name: name.unwrap_or_else(|| "Uncategorized".to_string()),
                color,
                total: amount,
                count: 1,
            }),
        }
    }
    buckets.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(buckets)
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Income and expense totals for the last `months` months ending at
/// (year, month), oldest first.
pub fn monthly_trend(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
    months: u32,
) -> Result<Vec<TrendPoint>> {
    let mut out = Vec::new();
    for back in (0..months).rev() {
        let (y, m) = crate::utils::months_back(year, month, back);
        let summary = monthly_summary(conn, user_id, y, m)?;
        let label = NaiveDate::from_ymd_opt(y, m, 1)
            .map(|d| d.format("%b").to_string())
            .unwrap_or_default();
        out.push(TrendPoint {
            year: y,
            month: m,
            label,
            income: summary.income,
            expenses: summary.expenses,
        });
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Over,
}

#[derive(Debug, Serialize)]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_name: String,
    pub color: Option<String>,
    pub amount: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// Display percentage, capped at 100.
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

/// Active budgets for the month with spent derived live from confirmed
/// expense transactions in the budget's category.
pub fn budget_progress(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
) -> Result<Vec<BudgetProgress>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.category_id, c.name, c.color, b.amount, b.threshold_percentage
         FROM budgets b JOIN categories c ON b.category_id=c.id
         WHERE b.user_id=?1 AND b.year=?2 AND b.month=?3 AND b.is_active=1
           AND b.deleted_at IS NULL
         ORDER BY c.name",
    )?;
    let rows = stmt.query_map(params![user_id, year, month], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, u32>(5)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (budget_id, category_id, category_name, color, amount_s, threshold) = row?;
        let amount: Decimal = amount_s
            .parse()
            .with_context(|| format!("Invalid amount '{}' in budgets", amount_s))?;
        let spent = ledger::category_expense_sum(conn, user_id, category_id, year, month)?;
        let raw_pct = pct_of(spent, amount).unwrap_or(Decimal::ZERO);
        let percentage = display_pct(raw_pct.min(Decimal::ONE_HUNDRED));
        let status = if spent > amount {
            BudgetStatus::Over
        } else if raw_pct >= Decimal::from(threshold) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        };
        out.push(BudgetProgress {
            budget_id,
            category_name,
            color,
            amount,
            spent,
            remaining: (amount - spent).max(Decimal::ZERO),
            percentage,
            status,
        });
    }
    Ok(out)
}

pub fn active_fixed_expenses(conn: &Connection, user_id: i64) -> Result<Vec<FixedExpense>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, category_id, description, amount, day_of_month, is_active
         FROM fixed_expenses
         WHERE user_id=?1 AND is_active=1 AND deleted_at IS NULL
         ORDER BY day_of_month, description",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, Option<i64>>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, u32>(5)?,
            r.get::<_, bool>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, user_id, category_id, description, amount_s, day_of_month, is_active) = row?;
        out.push(FixedExpense {
            id,
            user_id,
            category_id,
            description,
            amount: amount_s
                .parse()
                .with_context(|| format!("Invalid amount '{}' in fixed_expenses", amount_s))?,
            day_of_month,
            is_active,
        });
    }
    Ok(out)
}

/// Latest transactions, newest first.
pub fn recent_transactions(
    conn: &Connection,
    user_id: i64,
    limit: u32,
) -> Result<Vec<Transaction>> {
    ledger::recent(conn, user_id, limit)
}

/// Assembles the commitment calendar from current fixed-expense, debt, and
/// account state.
pub fn monthly_commitments(conn: &Connection, user_id: i64) -> Result<MonthlyCommitments> {
    let fixed = active_fixed_expenses(conn, user_id)?;
    let debts = debts::load_active(conn, user_id)?;
    let accounts = balance::load_all(conn, user_id)?;
    Ok(calendar::monthly_commitments(&fixed, &debts, &accounts))
}
