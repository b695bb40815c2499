// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance;
use crate::commands::USER_ID;
use crate::models::AccountKind;
use crate::money::to_cents;
use crate::utils::{id_for_account, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set-balance", sub)) => set_balance(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = AccountKind::parse(sub.get_one::<String>("type").unwrap())?;
    let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
    let balance = to_cents(parse_decimal(sub.get_one::<String>("balance").unwrap())?);
    let credit_limit = sub
        .get_one::<String>("credit-limit")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let closing_day = sub.get_one::<u32>("closing-day").copied();
    let due_day = sub.get_one::<u32>("due-day").copied();
    let include_in_total = !sub.get_flag("exclude-from-total");

    if kind != AccountKind::CreditCard
        && (credit_limit.is_some() || closing_day.is_some() || due_day.is_some())
    {
        anyhow::bail!("--credit-limit/--closing-day/--due-day only apply to credit_card accounts");
    }

    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency, \
         credit_limit, closing_day, due_day, include_in_total)
         VALUES (?1,?2,?3,?4,?4,?5,?6,?7,?8,?9)",
        params![
            USER_ID,
            name,
            kind.as_str(),
            balance.to_string(),
            ccy,
            credit_limit.map(|d| d.to_string()),
            closing_day,
            due_day,
            include_in_total,
        ],
    )?;
    println!("Added account '{}' ({}, {})", name, kind.as_str(), ccy);
    Ok(())
}

#[derive(Serialize)]
struct AccountRow {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    currency: String,
    balance: String,
    statement_balance: Option<String>,
    active: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let accounts = balance::load_all(conn, USER_ID)?;
    let data: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            kind: a.kind.as_str().to_string(),
            currency: a.currency.clone(),
            balance: format!("{:.2}", a.balance),
            statement_balance: a
                .credit_card
                .as_ref()
                .map(|cc| format!("{:.2}", cc.statement_balance)),
            active: a.is_active,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.kind.clone(),
                    r.currency.clone(),
                    r.balance.clone(),
                    r.statement_balance.clone().unwrap_or_default(),
                    if r.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Type", "CCY", "Balance", "Statement", "Active"],
                rows,
            )
        );
    }
    Ok(())
}

fn set_balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let account_id = id_for_account(conn, USER_ID, name)?;
    let new_balance = balance::rebaseline(conn, account_id, amount)?;
    if let Some(b) = new_balance {
        println!("Rebaselined '{}'; balance is now {:.2}", name, b);
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let account_id = id_for_account(conn, USER_ID, name)?;
    conn.execute(
        "UPDATE accounts SET deleted_at=datetime('now') WHERE id=?1",
        params![account_id],
    )?;
    println!("Removed account '{}'", name);
    Ok(())
}
