// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::{balance, db, statement};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_card(conn: &Connection, name: &str, limit: Option<&str>, closing_day: Option<u32>) -> i64 {
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency, \
         credit_limit, closing_day, due_day)
         VALUES (1, ?1, 'credit_card', '0', '0', 'USD', ?2, ?3, 20)",
        params![name, limit, closing_day],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn add_installment_debt(
    conn: &Connection,
    account_id: i64,
    name: &str,
    remaining: &str,
    monthly: &str,
) -> i64 {
    conn.execute(
        "INSERT INTO debts(user_id, name, type, account_id, total_amount, remaining_amount, \
         monthly_payment, start_date)
         VALUES (1, ?1, 'credit_card', ?2, ?3, ?3, ?4, '2026-01-01')",
        params![name, account_id, remaining, monthly],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn add_expense(conn: &Connection, account_id: i64, date: &str, amount: &str) {
    conn.execute(
        "INSERT INTO transactions(user_id, account_id, type, amount, date, is_confirmed)
         VALUES (1, ?1, 'expense', ?2, ?3, 1)",
        params![account_id, amount, date],
    )
    .unwrap();
}

#[test]
fn outstanding_credit_and_utilization() {
    let conn = db::open_in_memory().unwrap();
    let card = add_card(&conn, "Visa", Some("5000.00"), Some(10));
    add_installment_debt(&conn, card, "Laptop", "1000.00", "100.00");
    add_installment_debt(&conn, card, "Fridge", "500.00", "50.00");
    conn.execute(
        "UPDATE accounts SET statement_balance='-200.00' WHERE id=?1",
        params![card],
    )
    .unwrap();

    let account = balance::load(&conn, card).unwrap().unwrap();
    assert_eq!(
        statement::total_outstanding_debt(&conn, &account).unwrap(),
        dec("1700.00")
    );
    assert_eq!(
        statement::available_credit(&conn, &account).unwrap(),
        Some(dec("3300.00"))
    );
    assert_eq!(
        statement::credit_utilization(&conn, &account).unwrap(),
        Some(dec("34.0"))
    );
    assert_eq!(
        statement::total_monthly_payment(&conn, &account).unwrap(),
        dec("150.00")
    );
}

#[test]
fn paid_off_installments_drop_out_of_the_card_figures() {
    let conn = db::open_in_memory().unwrap();
    let card = add_card(&conn, "Visa", Some("5000.00"), Some(10));
    add_installment_debt(&conn, card, "Laptop", "1000.00", "100.00");
    let paid = add_installment_debt(&conn, card, "Fridge", "500.00", "50.00");
    conn.execute(
        "UPDATE debts SET remaining_amount='0' WHERE id=?1",
        params![paid],
    )
    .unwrap();

    let account = balance::load(&conn, card).unwrap().unwrap();
    assert_eq!(
        statement::total_outstanding_debt(&conn, &account).unwrap(),
        dec("1000.00")
    );
    assert_eq!(
        statement::total_monthly_payment(&conn, &account).unwrap(),
        dec("100.00")
    );
}

#[test]
fn missing_or_zero_limit_yields_not_applicable() {
    let conn = db::open_in_memory().unwrap();
    let card = add_card(&conn, "NoLimit", None, Some(10));
    let account = balance::load(&conn, card).unwrap().unwrap();
    assert_eq!(statement::available_credit(&conn, &account).unwrap(), None);
    assert_eq!(statement::credit_utilization(&conn, &account).unwrap(), None);

    let zero = add_card(&conn, "ZeroLimit", Some("0"), Some(10));
    let account = balance::load(&conn, zero).unwrap().unwrap();
    assert_eq!(statement::credit_utilization(&conn, &account).unwrap(), None);
}

#[test]
fn reconcile_sums_the_open_cycle_and_installments() {
    let conn = db::open_in_memory().unwrap();
    let card = add_card(&conn, "Visa", Some("5000.00"), Some(10));
    add_installment_debt(&conn, card, "Laptop", "1500.00", "150.00");
    // Inside the cycle that opened Aug 10.
    add_expense(&conn, card, "2026-08-12", "200.00");
    // Before the cycle start; must not count.
    add_expense(&conn, card, "2026-08-05", "999.00");
    // Pending; must not count.
    conn.execute(
        "INSERT INTO transactions(user_id, account_id, type, amount, date, is_confirmed)
         VALUES (1, ?1, 'expense', '50.00', '2026-08-13', 0)",
        params![card],
    )
    .unwrap();

    let stmt_balance = statement::reconcile(&conn, card, date("2026-08-15")).unwrap();
    assert_eq!(stmt_balance, Some(dec("-1700.00")));

    let account = balance::load(&conn, card).unwrap().unwrap();
    assert_eq!(
        account.credit_card.unwrap().statement_balance,
        dec("-1700.00")
    );
}

#[test]
fn reconcile_before_closing_day_reaches_into_last_month() {
    let conn = db::open_in_memory().unwrap();
    let card = add_card(&conn, "Visa", Some("5000.00"), Some(25));
    add_expense(&conn, card, "2026-07-26", "80.00");
    add_expense(&conn, card, "2026-07-20", "40.00");

    // Aug 15 is before the 25th, so the cycle opened July 25.
    let stmt_balance = statement::reconcile(&conn, card, date("2026-08-15")).unwrap();
    assert_eq!(stmt_balance, Some(dec("-80.00")));
}

#[test]
fn reconcile_is_a_noop_for_non_cards() {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency)
         VALUES (1, 'Checking', 'checking', '0', '0', 'USD')",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    assert_eq!(statement::reconcile(&conn, id, date("2026-08-15")).unwrap(), None);

    let no_closing = add_card(&conn, "NoClosing", Some("1000.00"), None);
    assert_eq!(
        statement::reconcile(&conn, no_closing, date("2026-08-15")).unwrap(),
        None
    );
}
