// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::USER_ID;
use crate::dashboard;
use crate::utils::{id_for_category, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let description = sub.get_one::<String>("description").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let day = *sub.get_one::<u32>("day").unwrap();
            let category_id = sub
                .get_one::<String>("category")
                .map(|c| id_for_category(conn, USER_ID, c))
                .transpose()?;
            conn.execute(
                "INSERT INTO fixed_expenses(user_id, category_id, description, amount, day_of_month)
                 VALUES (?1,?2,?3,?4,?5)",
                params![USER_ID, category_id, description, amount.to_string(), day],
            )?;
            println!("Added fixed expense '{}' ({} on day {})", description, amount, day);
        }
        Some(("list", _)) => {
            let data = dashboard::active_fixed_expenses(conn, USER_ID)?
                .iter()
                .map(|fe| {
                    vec![
                        fe.id.to_string(),
                        fe.description.clone(),
                        format!("{:.2}", fe.amount),
                        fe.day_of_month.to_string(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Id", "Description", "Amount", "Day"], data));
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            conn.execute(
                "UPDATE fixed_expenses SET deleted_at=datetime('now') WHERE id=?1 AND user_id=?2",
                params![id, USER_ID],
            )?;
            println!("Removed fixed expense {}", id);
        }
        _ => {}
    }
    Ok(())
}
