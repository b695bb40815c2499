// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::USER_ID;
use crate::debts;
use crate::models::DebtKind;
use crate::money::to_cents;
use crate::utils::{id_for_account, id_for_debt, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("plan", sub)) => plan(conn, sub)?,
        Some(("replan", sub)) => replan(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = DebtKind::parse(sub.get_one::<String>("type").unwrap())?;
    let total = to_cents(parse_decimal(sub.get_one::<String>("total").unwrap())?);
    let remaining = match sub.get_one::<String>("remaining") {
        Some(s) => to_cents(parse_decimal(s)?),
        None => total,
    };
    if remaining < Decimal::ZERO || remaining > total {
        bail!("Remaining amount must be between 0 and the total");
    }
    let monthly = sub
        .get_one::<String>("monthly")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = sub
        .get_one::<String>("end")
        .map(|s| parse_date(s))
        .transpose()?;
    let due_day = sub.get_one::<u32>("due-day").copied();
    let installments = sub.get_one::<u32>("installments").copied();

    let account_id = match (kind, sub.get_one::<String>("account")) {
        (DebtKind::CreditCard, Some(acct)) => Some(id_for_account(conn, USER_ID, acct)?),
        (DebtKind::CreditCard, None) => bail!("credit_card debts need --account <credit card>"),
        (DebtKind::Loan, Some(_)) => bail!("--account only applies to credit_card debts"),
        (DebtKind::Loan, None) => None,
    };

    conn.execute(
        "INSERT INTO debts(user_id, name, type, account_id, total_amount, remaining_amount, \
         monthly_payment, start_date, end_date, due_day, total_installments)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
        params![
            USER_ID,
            name,
            kind.as_str(),
            account_id,
            total.to_string(),
            remaining.to_string(),
            monthly.map(|d| d.to_string()),
            start,
            end,
            due_day,
            installments,
        ],
    )?;
    let debt_id = conn.last_insert_rowid();
    if monthly.is_none() && installments.is_some() {
        debts::calculate_monthly_payment(conn, debt_id)?;
    }
    println!("Added debt '{}' ({}, total {})", name, kind.as_str(), total);
    Ok(())
}

#[derive(Serialize)]
struct DebtRow {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    total: String,
    remaining: String,
    paid_pct: String,
    monthly: String,
    next_payment: String,
    closed: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Local::now().date_naive();
    let data: Vec<DebtRow> = debts::load_all(conn, USER_ID)?
        .iter()
        .map(|d| DebtRow {
            name: d.name.clone(),
            kind: d.kind.as_str().to_string(),
            total: format!("{:.2}", d.total_amount),
            remaining: format!("{:.2}", d.remaining_amount),
            paid_pct: format!("{}%", debts::paid_percentage(d)),
            monthly: d
                .monthly_payment
                .map(|m| format!("{:.2}", m))
                .unwrap_or_default(),
            next_payment: debts::next_payment_date(d, today)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            closed: d.closed_at.is_some(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.kind.clone(),
                    r.total.clone(),
                    r.remaining.clone(),
                    r.paid_pct.clone(),
                    r.monthly.clone(),
                    r.next_payment.clone(),
                    if r.closed { "yes".into() } else { "".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Type", "Total", "Remaining", "Paid", "Monthly", "Next payment", "Closed"],
                rows,
            )
        );
    }
    Ok(())
}

fn plan(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let debt_id = id_for_debt(conn, USER_ID, name)?;
    match debts::calculate_monthly_payment(conn, debt_id)? {
        Some(monthly) => println!("Monthly payment for '{}' set to {:.2}", name, monthly),
        None => println!("'{}' has no installment count; nothing to plan", name),
    }
    Ok(())
}

fn replan(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let debt_id = id_for_debt(conn, USER_ID, name)?;
    let today = chrono::Local::now().date_naive();
    match debts::recalculate_monthly_payment(conn, debt_id, today)? {
        Some(monthly) => println!("Monthly payment for '{}' set to {:.2}", name, monthly),
        None => println!("'{}' has no end date; nothing to replan", name),
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let debt_id = id_for_debt(conn, USER_ID, name)?;
    conn.execute(
        "UPDATE debts SET deleted_at=datetime('now') WHERE id=?1",
        params![debt_id],
    )?;
    println!("Removed debt '{}'", name);
    Ok(())
}
