// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance;
use crate::commands::USER_ID;
use crate::statement;
use crate::utils::{id_for_account, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("reconcile", sub)) => reconcile(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn reconcile(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("account").unwrap();
    let account_id = id_for_account(conn, USER_ID, name)?;
    let today = chrono::Local::now().date_naive();
    match statement::reconcile(conn, account_id, today)? {
        Some(bal) => println!("Statement balance for '{}' is now {:.2}", name, bal),
        None => println!("'{}' is not a credit card with a closing day; nothing to do", name),
    }
    Ok(())
}

#[derive(Serialize)]
struct StatementView {
    account: String,
    statement_balance: String,
    credit_limit: Option<String>,
    total_outstanding: String,
    available_credit: Option<String>,
    utilization_pct: Option<String>,
    total_monthly_payment: String,
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("account").unwrap();
    let account_id = id_for_account(conn, USER_ID, name)?;
    let account = balance::load(conn, account_id)?
        .with_context(|| format!("Account '{}' not found", name))?;
    let details = account
        .credit_card
        .as_ref()
        .with_context(|| format!("'{}' is not a credit card", name))?;

    let view = StatementView {
        account: account.name.clone(),
        statement_balance: format!("{:.2}", details.statement_balance),
        credit_limit: details.credit_limit.map(|l| format!("{:.2}", l)),
        total_outstanding: format!("{:.2}", statement::total_outstanding_debt(conn, &account)?),
        available_credit: statement::available_credit(conn, &account)?
            .map(|c| format!("{:.2}", c)),
        utilization_pct: statement::credit_utilization(conn, &account)?
            .map(|u| format!("{}%", u)),
        total_monthly_payment: format!("{:.2}", statement::total_monthly_payment(conn, &account)?),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &view)? {
        let rows = vec![
            vec!["Statement balance".into(), view.statement_balance.clone()],
            vec![
                "Credit limit".into(),
                view.credit_limit.clone().unwrap_or_else(|| "n/a".into()),
            ],
            vec!["Total outstanding".into(), view.total_outstanding.clone()],
            vec![
                "Available credit".into(),
                view.available_credit.clone().unwrap_or_else(|| "n/a".into()),
            ],
            vec![
                "Utilization".into(),
                view.utilization_pct.clone().unwrap_or_else(|| "n/a".into()),
            ],
            vec!["Monthly payment".into(), view.total_monthly_payment.clone()],
        ];
        let title = format!("Card: {}", view.account);
        println!("{}", pretty_table(&[title.as_str(), "Value"], rows));
    }
    Ok(())
}
