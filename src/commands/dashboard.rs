// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance;
use crate::commands::USER_ID;
use crate::dashboard;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Serialize)]
struct DashboardView {
    year: i32,
    month: u32,
    total_balance: String,
    summary: dashboard::MonthlySummary,
    expenses_by_category: Vec<dashboard::CategorySpend>,
    budgets: Vec<dashboard::BudgetProgress>,
    trend: Vec<dashboard::TrendPoint>,
    recent: Vec<crate::models::Transaction>,
    commitments: crate::calendar::MonthlyCommitments,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let (year, month) = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => {
            let today = chrono::Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let view = DashboardView {
        year,
        month,
        total_balance: format!("{:.2}", balance::total_balance(conn, USER_ID)?),
        summary: dashboard::monthly_summary(conn, USER_ID, year, month)?,
        expenses_by_category: dashboard::expenses_by_category(conn, USER_ID, year, month)?,
        budgets: dashboard::budget_progress(conn, USER_ID, year, month)?,
        trend: dashboard::monthly_trend(conn, USER_ID, year, month, 6)?,
        recent: dashboard::recent_transactions(conn, USER_ID, 10)?,
        commitments: dashboard::monthly_commitments(conn, USER_ID)?,
    };
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    println!("— {}-{:02} —", view.year, view.month);
    println!("Total balance: {}", view.total_balance);
    println!(
        "Income {:.2}  Expenses {:.2}  Savings {:.2}",
        view.summary.income, view.summary.expenses, view.summary.savings
    );

    if !view.expenses_by_category.is_empty() {
        let rows = view
            .expenses_by_category
            .iter()
            .map(|c| {
                vec![
                    c.category_name.clone(),
                    format!("{:.2}", c.total),
                    c.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Count"], rows));
    }

    if !view.budgets.is_empty() {
        let rows = view
            .budgets
            .iter()
            .map(|b| {
                vec![
                    b.category_name.clone(),
                    format!("{:.2}", b.amount),
                    format!("{:.2}", b.spent),
                    format!("{}%", b.percentage),
                    format!("{:?}", b.status).to_lowercase(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Amount", "Spent", "Used", "Status"], rows)
        );
    }

    let rows = view
        .trend
        .iter()
        .map(|t| {
            vec![
                format!("{} {}", t.label, t.year),
                format!("{:.2}", t.income),
                format!("{:.2}", t.expenses),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));

    if !view.recent.is_empty() {
        let rows = view
            .recent
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    format!("{:.2}", t.amount),
                    t.description.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Type", "Amount", "Description"], rows));
    }

    let c = &view.commitments;
    if !c.entries.is_empty() {
        let rows = c
            .entries
            .iter()
            .map(|e| {
                vec![
                    e.day.to_string(),
                    e.name.clone(),
                    format!("{:.2}", e.amount),
                    e.kind.as_str().to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Day", "Commitment", "Amount", "Kind"], rows));
        println!(
            "Fixed {:.2} + Loans {:.2} + Cards {:.2} = {:.2} committed this month",
            c.fixed_total, c.loan_total, c.credit_card_total, c.grand_total
        );
    }
    Ok(())
}
