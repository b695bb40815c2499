// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::USER_ID;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color");
            let icon = sub.get_one::<String>("icon");
            conn.execute(
                "INSERT INTO categories(user_id, name, color, icon) VALUES (?1,?2,?3,?4)",
                params![USER_ID, name, color, icon],
            )?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare(
                "SELECT name, IFNULL(color,''), IFNULL(icon,'') FROM categories
                 WHERE user_id=?1 ORDER BY name",
            )?;
            let rows = stmt.query_map(params![USER_ID], |r| {
                Ok(vec![
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ])
            })?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            println!("{}", pretty_table(&["Name", "Color", "Icon"], data));
        }
        _ => {}
    }
    Ok(())
}
