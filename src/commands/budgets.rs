// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::USER_ID;
use crate::dashboard;
use crate::utils::{id_for_category, maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("progress", sub)) => progress(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let cat = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let threshold = sub.get_one::<u32>("threshold").copied().unwrap_or(80);
    let cat_id = id_for_category(conn, USER_ID, cat)?;
    conn.execute(
        "INSERT INTO budgets(user_id, category_id, year, month, amount, threshold_percentage)
         VALUES (?1,?2,?3,?4,?5,?6)
         ON CONFLICT(user_id, category_id, year, month)
         DO UPDATE SET amount=excluded.amount, threshold_percentage=excluded.threshold_percentage",
        params![USER_ID, cat_id, year, month, amount.to_string(), threshold],
    )?;
    println!("Budget set for {}-{:02} / {} = {}", year, month, cat, amount);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut sql = String::from(
        "SELECT b.year, b.month, c.name, b.amount, b.threshold_percentage
         FROM budgets b JOIN categories c ON b.category_id=c.id
         WHERE b.user_id=?1 AND b.deleted_at IS NULL",
    );
    let month_filter = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    if month_filter.is_some() {
        sql.push_str(" AND b.year=?2 AND b.month=?3 ORDER BY c.name");
    } else {
        sql.push_str(" ORDER BY b.year DESC, b.month DESC, c.name");
    }
    let mut stmt = conn.prepare(&sql)?;
    let map = |r: &rusqlite::Row| {
        Ok((
            r.get::<_, i32>(0)?,
            r.get::<_, u32>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, u32>(4)?,
        ))
    };
    let rows = match month_filter {
        Some((y, m)) => stmt.query_map(params![USER_ID, y, m], map)?,
        None => stmt.query_map(params![USER_ID], map)?,
    };
    let mut data = Vec::new();
    for row in rows {
        let (y, m, c, a, t) = row?;
        data.push(vec![format!("{}-{:02}", y, m), c, a, format!("{}%", t)]);
    }
    println!(
        "{}",
        pretty_table(&["Month", "Category", "Budget", "Threshold"], data)
    );
    Ok(())
}

fn progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => {
            let today = chrono::Local::now().date_naive();
            (today.year(), today.month())
        }
    };
    let data = dashboard::budget_progress(conn, USER_ID, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.category_name.clone(),
                    format!("{:.2}", b.amount),
                    format!("{:.2}", b.spent),
                    format!("{:.2}", b.remaining),
                    format!("{}%", b.percentage),
                    format!("{:?}", b.status).to_lowercase(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Budget", "Spent", "Remaining", "Used", "Status"],
                rows,
            )
        );
    }
    Ok(())
}
