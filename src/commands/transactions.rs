// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::USER_ID;
use crate::ledger;
use crate::lifecycle::{self, TxEvent};
use crate::models::{Transaction, TxKind};
use crate::utils::{
    id_for_account, id_for_category, id_for_debt, maybe_print_json, parse_amount, parse_date,
    pretty_table,
};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("confirm", sub)) => set_confirmed(conn, sub, true)?,
        Some(("unconfirm", sub)) => set_confirmed(conn, sub, false)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let account_name = sub.get_one::<String>("account").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind = TxKind::parse(sub.get_one::<String>("type").unwrap())?;
    let account_id = id_for_account(conn, USER_ID, account_name)?;

    let transfer_to_account_id = match (kind, sub.get_one::<String>("to")) {
        (TxKind::Transfer, Some(to)) => {
            let dest = id_for_account(conn, USER_ID, to)?;
            if dest == account_id {
                bail!("Transfer source and destination must be different accounts");
            }
            Some(dest)
        }
        (TxKind::Transfer, None) => bail!("Transfers need --to <account>"),
        (_, Some(_)) => bail!("--to only applies to transfers"),
        (_, None) => None,
    };
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(conn, USER_ID, c))
        .transpose()?;
    let debt_id = sub
        .get_one::<String>("debt")
        .map(|d| id_for_debt(conn, USER_ID, d))
        .transpose()?;

    let tx = Transaction {
        id: 0,
        user_id: USER_ID,
        account_id,
        category_id,
        transfer_to_account_id,
        debt_id,
        kind,
        amount,
        description: sub.get_one::<String>("description").unwrap().clone(),
        notes: sub.get_one::<String>("note").cloned(),
        date,
        time: None,
        is_confirmed: !sub.get_flag("pending"),
        is_recurring: false,
        recurring_frequency: None,
        recurring_end_date: None,
        reference: None,
        tags: Vec::new(),
    };
    let stored = ledger::insert(conn, &tx)?;
    lifecycle::on_event(
        conn,
        &TxEvent::Created(&stored),
        chrono::Local::now().naive_local(),
    )?;
    println!(
        "Recorded {} {} on {} (acct: {}){}",
        kind.as_str(),
        amount,
        date,
        account_name,
        if stored.is_confirmed { "" } else { " [pending]" }
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub account: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub confirmed: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, a.name, t.type, t.amount, c.name, t.description, t.is_confirmed
         FROM transactions t
         LEFT JOIN accounts a ON t.account_id=a.id
         LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.user_id=? AND t.deleted_at IS NULL",
    );
    let mut params_vec: Vec<String> = vec![crate::commands::USER_ID.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND a.name=?");
        params_vec.push(acct.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        sql.push_str(" AND t.type=?");
        params_vec.push(kind.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let category: Option<String> = r.get(5)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            account: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            kind: r.get(3)?,
            amount: r.get(4)?,
            category: category.unwrap_or_default(),
            description: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
            confirmed: r.get(7)?,
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.account.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    if r.confirmed { "yes".into() } else { "pending".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Account", "Type", "Amount", "Category", "Description", "Confirmed"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let before = ledger::get(conn, id)?.with_context(|| format!("Transaction {} not found", id))?;
    let mut after = before.clone();

    if let Some(date) = sub.get_one::<String>("date") {
        after.date = parse_date(date)?;
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        after.amount = parse_amount(amount)?;
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        after.kind = TxKind::parse(kind)?;
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        after.account_id = id_for_account(conn, USER_ID, acct)?;
    }
    if let Some(to) = sub.get_one::<String>("to") {
        after.transfer_to_account_id = Some(id_for_account(conn, USER_ID, to)?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        after.category_id = Some(id_for_category(conn, USER_ID, cat)?);
    }
    if let Some(debt) = sub.get_one::<String>("debt") {
        after.debt_id = Some(id_for_debt(conn, USER_ID, debt)?);
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        after.description = desc.clone();
    }

    if after.kind != TxKind::Transfer {
        after.transfer_to_account_id = None;
    } else {
        match after.transfer_to_account_id {
            Some(dest) if dest == after.account_id => {
                bail!("Transfer source and destination must be different accounts")
            }
            Some(_) => {}
            None => bail!("Transfers need --to <account>"),
        }
    }

    ledger::update(conn, &after)?;
    lifecycle::on_event(
        conn,
        &TxEvent::Updated {
            before: &before,
            after: &after,
        },
        chrono::Local::now().naive_local(),
    )?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn set_confirmed(conn: &Connection, sub: &clap::ArgMatches, confirmed: bool) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let before = ledger::get(conn, id)?.with_context(|| format!("Transaction {} not found", id))?;
    if before.is_confirmed == confirmed {
        println!(
            "Transaction {} is already {}",
            id,
            if confirmed { "confirmed" } else { "pending" }
        );
        return Ok(());
    }
    let mut after = before.clone();
    after.is_confirmed = confirmed;
    ledger::update(conn, &after)?;
    lifecycle::on_event(
        conn,
        &TxEvent::Updated {
            before: &before,
            after: &after,
        },
        chrono::Local::now().naive_local(),
    )?;
    println!(
        "Transaction {} is now {}",
        id,
        if confirmed { "confirmed" } else { "pending" }
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let tx = ledger::get(conn, id)?.with_context(|| format!("Transaction {} not found", id))?;
    ledger::soft_delete(conn, id)?;
    lifecycle::on_event(
        conn,
        &TxEvent::Deleted(&tx),
        chrono::Local::now().naive_local(),
    )?;
    println!("Deleted transaction {}", id);
    Ok(())
}
