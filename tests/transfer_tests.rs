// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::lifecycle::{self, TxEvent};
use centavo::models::{Transaction, TxKind};
use centavo::{balance, db, ledger};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn add_account(conn: &Connection, name: &str, balance: &str) -> i64 {
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency)
         VALUES (1, ?1, 'checking', ?2, ?2, 'USD')",
        params![name, balance],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn transfer(source: i64, dest: i64, amount: &str) -> Transaction {
    Transaction {
        id: 0,
        user_id: 1,
        account_id: source,
        category_id: None,
        transfer_to_account_id: Some(dest),
        debt_id: None,
        kind: TxKind::Transfer,
        amount: dec(amount),
        description: String::new(),
        notes: None,
        date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
        time: None,
        is_confirmed: true,
        is_recurring: false,
        recurring_frequency: None,
        recurring_end_date: None,
        reference: None,
        tags: Vec::new(),
    }
}

fn create(conn: &Connection, t: &Transaction) -> Transaction {
    let stored = ledger::insert(conn, t).unwrap();
    lifecycle::on_event(conn, &TxEvent::Created(&stored), now()).unwrap();
    stored
}

fn balance_of(conn: &Connection, account_id: i64) -> Decimal {
    balance::load(conn, account_id).unwrap().unwrap().balance
}

#[test]
fn transfer_moves_amount_symmetrically_and_delete_restores() {
    let conn = db::open_in_memory().unwrap();
    let a = add_account(&conn, "A", "1000.00");
    let b = add_account(&conn, "B", "500.00");

    let t = create(&conn, &transfer(a, b, "300.00"));
    assert_eq!(balance_of(&conn, a), dec("700.00"));
    assert_eq!(balance_of(&conn, b), dec("800.00"));

    ledger::soft_delete(&conn, t.id).unwrap();
    lifecycle::on_event(&conn, &TxEvent::Deleted(&t), now()).unwrap();
    assert_eq!(balance_of(&conn, a), dec("1000.00"));
    assert_eq!(balance_of(&conn, b), dec("500.00"));
}

#[test]
fn retargeting_a_transfer_heals_the_old_destination() {
    let conn = db::open_in_memory().unwrap();
    let a = add_account(&conn, "A", "1000.00");
    let b = add_account(&conn, "B", "0.00");
    let c = add_account(&conn, "C", "0.00");

    let t = create(&conn, &transfer(a, b, "250.00"));
    assert_eq!(balance_of(&conn, b), dec("250.00"));

    let mut after = t.clone();
    after.transfer_to_account_id = Some(c);
    ledger::update(&conn, &after).unwrap();
    lifecycle::on_event(
        &conn,
        &TxEvent::Updated {
            before: &t,
            after: &after,
        },
        now(),
    )
    .unwrap();

    assert_eq!(balance_of(&conn, a), dec("750.00"));
    assert_eq!(balance_of(&conn, b), dec("0.00"));
    assert_eq!(balance_of(&conn, c), dec("250.00"));
}

#[test]
fn moving_a_transaction_between_accounts_heals_the_old_account() {
    let conn = db::open_in_memory().unwrap();
    let a = add_account(&conn, "A", "100.00");
    let b = add_account(&conn, "B", "100.00");

    let mut expense = transfer(a, b, "40.00");
    expense.kind = TxKind::Expense;
    expense.transfer_to_account_id = None;
    let t = create(&conn, &expense);
    assert_eq!(balance_of(&conn, a), dec("60.00"));
    assert_eq!(balance_of(&conn, b), dec("100.00"));

    let mut after = t.clone();
    after.account_id = b;
    ledger::update(&conn, &after).unwrap();
    lifecycle::on_event(
        &conn,
        &TxEvent::Updated {
            before: &t,
            after: &after,
        },
        now(),
    )
    .unwrap();

    assert_eq!(balance_of(&conn, a), dec("100.00"));
    assert_eq!(balance_of(&conn, b), dec("60.00"));
}

#[test]
fn pending_transfer_is_inert_on_both_sides() {
    let conn = db::open_in_memory().unwrap();
    let a = add_account(&conn, "A", "1000.00");
    let b = add_account(&conn, "B", "500.00");

    let mut t = transfer(a, b, "300.00");
    t.is_confirmed = false;
    create(&conn, &t);
    assert_eq!(balance_of(&conn, a), dec("1000.00"));
    assert_eq!(balance_of(&conn, b), dec("500.00"));
}
