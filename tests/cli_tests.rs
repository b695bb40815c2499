// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::{cli, commands::transactions, db};
use rusqlite::params;

#[test]
fn tx_list_limit_respected() {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency)
         VALUES (1, 'A1', 'checking', '0', '0', 'USD')",
        [],
    )
    .unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(user_id, account_id, type, amount, date, is_confirmed)
             VALUES (1, 1, 'expense', '10.00', ?1, 1)",
            params![format!("2026-01-0{}", i)],
        )
        .unwrap();
    }

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["centavo", "tx", "list", "--limit", "2"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2026-01-03");
}

#[test]
fn tx_list_filters_by_month_and_type() {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency)
         VALUES (1, 'A1', 'checking', '0', '0', 'USD')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, account_id, type, amount, date, is_confirmed)
         VALUES (1, 1, 'expense', '10.00', '2026-01-05', 1),
                (1, 1, 'income', '20.00', '2026-01-06', 1),
                (1, 1, 'expense', '30.00', '2026-02-05', 1)",
        [],
    )
    .unwrap();

    let matches = cli::build_cli().get_matches_from([
        "centavo", "tx", "list", "--month", "2026-01", "--type", "expense",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "10.00");
}

#[test]
fn open_at_creates_a_working_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("centavo.sqlite");
    let conn = db::open_at(&path).unwrap();
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency)
         VALUES (1, 'A1', 'checking', '0', '0', 'USD')",
        [],
    )
    .unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 1);
}
