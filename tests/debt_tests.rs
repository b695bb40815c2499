// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::lifecycle::{self, TxEvent};
use centavo::models::{Transaction, TxKind};
use centavo::{db, debts, ledger};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn now() -> NaiveDateTime {
    date("2026-08-15").and_hms_opt(12, 0, 0).unwrap()
}

fn add_account(conn: &Connection, name: &str) -> i64 {
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, baseline_balance, currency)
         VALUES (1, ?1, 'checking', '10000.00', '10000.00', 'USD')",
        params![name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn add_loan(conn: &Connection, name: &str, total: &str, installments: Option<u32>) -> i64 {
    conn.execute(
        "INSERT INTO debts(user_id, name, type, total_amount, remaining_amount, start_date, \
         total_installments)
         VALUES (1, ?1, 'loan', ?2, ?2, '2026-01-01', ?3)",
        params![name, total, installments],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn pay(conn: &Connection, account_id: i64, debt_id: i64, amount: &str) -> Transaction {
    let t = Transaction {
        id: 0,
        user_id: 1,
        account_id,
        category_id: None,
        transfer_to_account_id: None,
        debt_id: Some(debt_id),
        kind: TxKind::Expense,
        amount: dec(amount),
        description: "payment".into(),
        notes: None,
        date: date("2026-08-10"),
        time: None,
        is_confirmed: true,
        is_recurring: false,
        recurring_frequency: None,
        recurring_end_date: None,
        reference: None,
        tags: Vec::new(),
    };
    let stored = ledger::insert(conn, &t).unwrap();
    lifecycle::on_event(conn, &TxEvent::Created(&stored), now()).unwrap();
    stored
}

#[test]
fn equal_installments_divide_the_total() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Car", "1200.00", Some(12));
    let monthly = debts::calculate_monthly_payment(&conn, debt_id).unwrap();
    assert_eq!(monthly, Some(dec("100.00")));
}

#[test]
fn last_installment_absorbs_the_rounding_residual() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "TV", "1000.00", Some(3));
    let monthly = debts::calculate_monthly_payment(&conn, debt_id).unwrap().unwrap();
    assert_eq!(monthly, dec("333.33"));

    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    let last = debts::final_installment(&debt).unwrap();
    assert_eq!(last, dec("333.34"));
    assert_eq!(monthly * Decimal::from(2) + last, dec("1000.00"));
}

#[test]
fn no_installment_count_means_nothing_to_plan() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Open", "1000.00", None);
    assert_eq!(debts::calculate_monthly_payment(&conn, debt_id).unwrap(), None);
}

#[test]
fn confirmed_payments_reduce_the_remaining_amount() {
    let conn = db::open_in_memory().unwrap();
    let acct = add_account(&conn, "Checking");
    let debt_id = add_loan(&conn, "Car", "1200.00", Some(12));

    for _ in 0..3 {
        pay(&conn, acct, debt_id, "100.00");
    }
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    assert_eq!(debt.remaining_amount, dec("900.00"));
    assert_eq!(debt.closed_at, None);
}

#[test]
fn overpayment_floors_at_zero_and_closes_once() {
    let conn = db::open_in_memory().unwrap();
    let acct = add_account(&conn, "Checking");
    let debt_id = add_loan(&conn, "Small", "250.00", None);

    pay(&conn, acct, debt_id, "300.00");
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    assert_eq!(debt.remaining_amount, dec("0.00"));
    let first_close = debt.closed_at.expect("debt should be closed");

    // A second recompute at a later time must not restamp the close.
    let later = date("2026-09-01").and_hms_opt(9, 0, 0).unwrap();
    debts::update_balance(&conn, debt_id, later).unwrap();
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    assert_eq!(debt.closed_at, Some(first_close));
}

#[test]
fn deleting_the_last_payment_reopens_the_debt() {
    let conn = db::open_in_memory().unwrap();
    let acct = add_account(&conn, "Checking");
    let debt_id = add_loan(&conn, "Phone", "600.00", None);

    pay(&conn, acct, debt_id, "400.00");
    let last = pay(&conn, acct, debt_id, "200.00");
    assert!(debts::load(&conn, debt_id).unwrap().unwrap().closed_at.is_some());

    ledger::soft_delete(&conn, last.id).unwrap();
    lifecycle::on_event(&conn, &TxEvent::Deleted(&last), now()).unwrap();
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    assert_eq!(debt.remaining_amount, dec("200.00"));
    assert_eq!(debt.closed_at, None);
}

#[test]
fn pending_payments_do_not_amortize() {
    let conn = db::open_in_memory().unwrap();
    let acct = add_account(&conn, "Checking");
    let debt_id = add_loan(&conn, "Car", "1200.00", None);

    let mut t = Transaction {
        id: 0,
        user_id: 1,
        account_id: acct,
        category_id: None,
        transfer_to_account_id: None,
        debt_id: Some(debt_id),
        kind: TxKind::Expense,
        amount: dec("100.00"),
        description: String::new(),
        notes: None,
        date: date("2026-08-10"),
        time: None,
        is_confirmed: false,
        is_recurring: false,
        recurring_frequency: None,
        recurring_end_date: None,
        reference: None,
        tags: Vec::new(),
    };
    t = ledger::insert(&conn, &t).unwrap();
    lifecycle::on_event(&conn, &TxEvent::Created(&t), now()).unwrap();
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    assert_eq!(debt.remaining_amount, dec("1200.00"));
}

#[test]
fn replan_spreads_remaining_over_months_left() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Trip", "600.00", None);
    conn.execute(
        "UPDATE debts SET end_date='2026-12-31' WHERE id=?1",
        params![debt_id],
    )
    .unwrap();

    // Aug 15 -> Dec 31: four whole months plus the current one.
    let monthly = debts::recalculate_monthly_payment(&conn, debt_id, date("2026-08-15")).unwrap();
    assert_eq!(monthly, Some(dec("120.00")));
}

#[test]
fn replan_past_end_date_makes_the_remainder_due() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Trip", "600.00", None);
    conn.execute(
        "UPDATE debts SET end_date='2026-12-31', remaining_amount='450.00' WHERE id=?1",
        params![debt_id],
    )
    .unwrap();

    let monthly = debts::recalculate_monthly_payment(&conn, debt_id, date("2027-01-02")).unwrap();
    assert_eq!(monthly, Some(dec("450.00")));
}

#[test]
fn replan_without_end_date_is_a_noop() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Open", "600.00", None);
    assert_eq!(
        debts::recalculate_monthly_payment(&conn, debt_id, date("2026-08-15")).unwrap(),
        None
    );
}

#[test]
fn next_payment_date_rolls_forward_past_the_due_day() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Car", "1200.00", None);
    conn.execute("UPDATE debts SET due_day=15 WHERE id=?1", params![debt_id]).unwrap();
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();

    assert_eq!(
        debts::next_payment_date(&debt, date("2026-08-10")),
        Some(date("2026-08-15"))
    );
    assert_eq!(
        debts::next_payment_date(&debt, date("2026-08-20")),
        Some(date("2026-09-15"))
    );
    assert_eq!(
        debts::next_payment_date(&debt, date("2026-12-20")),
        Some(date("2027-01-15"))
    );
}

#[test]
fn next_payment_date_clamps_to_short_months() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Card", "100.00", None);
    conn.execute("UPDATE debts SET due_day=31 WHERE id=?1", params![debt_id]).unwrap();
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();

    assert_eq!(
        debts::next_payment_date(&debt, date("2026-02-10")),
        Some(date("2026-02-28"))
    );
}

#[test]
fn next_payment_date_without_due_day_is_none() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Car", "1200.00", None);
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    assert_eq!(debts::next_payment_date(&debt, date("2026-08-10")), None);
}

#[test]
fn paid_percentage_rounds_for_display() {
    let conn = db::open_in_memory().unwrap();
    let debt_id = add_loan(&conn, "Car", "1200.00", None);
    conn.execute(
        "UPDATE debts SET remaining_amount='800.00' WHERE id=?1",
        params![debt_id],
    )
    .unwrap();
    let debt = debts::load(&conn, debt_id).unwrap().unwrap();
    assert_eq!(debts::paid_percentage(&debt), dec("33.3"));
}
