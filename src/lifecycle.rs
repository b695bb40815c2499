// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction lifecycle coordinator.
//!
//! Every transaction write is reported here as an explicit event carrying the
//! before/after state. `plan` decides, purely, which accounts get an
//! incremental adjustment, which need a full recompute, and which debts must be
//! rederived; `apply` executes the plan synchronously so a write is never
//! visible without its balance effect.
//!
//! Creates take the single-delta fast path. Updates and deletes always full
//! recompute: amount, type, account, and confirmation can all change at once,
//! and point-wise reversal of that is where stale balances come from. When a
//! transaction is moved between accounts or debts, the entity it was moved
//! away from is recomputed too.

use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::balance::{self, Direction};
use crate::debts;
use crate::models::{Transaction, TxKind};

#[derive(Debug)]
pub enum TxEvent<'a> {
    Created(&'a Transaction),
    Updated {
        before: &'a Transaction,
        after: &'a Transaction,
    },
    Deleted(&'a Transaction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub account_id: i64,
    pub amount: Decimal,
    pub direction: Direction,
}

/// What a write requires before it counts as done. Adjustments and full
/// recomputes are mutually exclusive per event kind; debts always rederive
/// from their payment set.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecomputePlan {
    pub adjustments: Vec<Adjustment>,
    pub recompute_accounts: Vec<i64>,
    pub recompute_debts: Vec<i64>,
}

impl RecomputePlan {
    fn account(&mut self, id: i64) {
        if !self.recompute_accounts.contains(&id) {
            self.recompute_accounts.push(id);
        }
    }

    fn debt(&mut self, id: i64) {
        if !self.recompute_debts.contains(&id) {
            self.recompute_debts.push(id);
        }
    }
}

pub fn plan(event: &TxEvent) -> RecomputePlan {
    let mut plan = RecomputePlan::default();
    match event {
        TxEvent::Created(tx) => {
            if tx.is_confirmed {
                let direction = match tx.kind {
                    TxKind::Income => Direction::Credit,
                    TxKind::Expense | TxKind::Transfer => Direction::Debit,
                };
                plan.adjustments.push(Adjustment {
                    account_id: tx.account_id,
                    amount: tx.amount,
                    direction,
                });
                if tx.is_transfer()
                    && let Some(dest) = tx.transfer_to_account_id
                {
                    plan.adjustments.push(Adjustment {
                        account_id: dest,
                        amount: tx.amount,
                        direction: Direction::Credit,
                    });
                }
            }
            if let Some(debt_id) = tx.debt_id {
                plan.debt(debt_id);
            }
        }
        TxEvent::Updated { before, after } => {
            plan.account(after.account_id);
            if after.is_transfer()
                && let Some(dest) = after.transfer_to_account_id
            {
                plan.account(dest);
            }
            // Whatever the transaction was moved away from still holds its old
            // contribution until recomputed.
            if before.account_id != after.account_id {
                plan.account(before.account_id);
            }
            if before.transfer_to_account_id != after.transfer_to_account_id
                && let Some(old_dest) = before.transfer_to_account_id
            {
                plan.account(old_dest);
            }
            if let Some(debt_id) = after.debt_id {
                plan.debt(debt_id);
            }
            if before.debt_id != after.debt_id
                && let Some(old_debt) = before.debt_id
            {
                plan.debt(old_debt);
            }
        }
        TxEvent::Deleted(tx) => {
            plan.account(tx.account_id);
            if tx.is_transfer()
                && let Some(dest) = tx.transfer_to_account_id
            {
                plan.account(dest);
            }
            if let Some(debt_id) = tx.debt_id {
                plan.debt(debt_id);
            }
        }
    }
    plan
}

/// Runs the plan to completion. Missing accounts or debts are no-ops; soft
/// deletion may leave dangling historical links behind.
pub fn apply(conn: &Connection, plan: &RecomputePlan, now: NaiveDateTime) -> Result<()> {
    for adj in &plan.adjustments {
        balance::adjust(conn, adj.account_id, adj.amount, adj.direction)?;
    }
    for account_id in &plan.recompute_accounts {
        balance::recompute(conn, *account_id)?;
    }
    for debt_id in &plan.recompute_debts {
        debts::update_balance(conn, *debt_id, now)?;
    }
    Ok(())
}

pub fn on_event(conn: &Connection, event: &TxEvent, now: NaiveDateTime) -> Result<()> {
    apply(conn, &plan(event), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: i64, account_id: i64, kind: TxKind) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            account_id,
            category_id: None,
            transfer_to_account_id: None,
            debt_id: None,
            kind,
            amount: "100.00".parse().unwrap(),
            description: String::new(),
            notes: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            time: None,
            is_confirmed: true,
            is_recurring: false,
            recurring_frequency: None,
            recurring_end_date: None,
            reference: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn pending_create_adjusts_nothing() {
        let mut t = tx(1, 10, TxKind::Expense);
        t.is_confirmed = false;
        let p = plan(&TxEvent::Created(&t));
        assert!(p.adjustments.is_empty());
        assert!(p.recompute_accounts.is_empty());
    }

    #[test]
    fn confirmed_transfer_create_adjusts_both_sides() {
        let mut t = tx(1, 10, TxKind::Transfer);
        t.transfer_to_account_id = Some(20);
        let p = plan(&TxEvent::Created(&t));
        assert_eq!(p.adjustments.len(), 2);
        assert_eq!(p.adjustments[0].direction, Direction::Debit);
        assert_eq!(p.adjustments[1].account_id, 20);
        assert_eq!(p.adjustments[1].direction, Direction::Credit);
    }

    #[test]
    fn reassigned_update_recomputes_previous_entities() {
        let mut before = tx(1, 10, TxKind::Transfer);
        before.transfer_to_account_id = Some(20);
        before.debt_id = Some(5);
        let mut after = tx(1, 11, TxKind::Transfer);
        after.transfer_to_account_id = Some(21);
        after.debt_id = Some(6);
        let p = plan(&TxEvent::Updated {
            before: &before,
            after: &after,
        });
        assert_eq!(p.recompute_accounts, vec![11, 21, 10, 20]);
        assert_eq!(p.recompute_debts, vec![6, 5]);
        assert!(p.adjustments.is_empty());
    }

    #[test]
    fn update_without_reassignment_recomputes_only_current() {
        let before = tx(1, 10, TxKind::Expense);
        let mut after = tx(1, 10, TxKind::Expense);
        after.amount = "250.00".parse().unwrap();
        let p = plan(&TxEvent::Updated {
            before: &before,
            after: &after,
        });
        assert_eq!(p.recompute_accounts, vec![10]);
        assert!(p.recompute_debts.is_empty());
    }

    #[test]
    fn delete_recomputes_account_and_debt() {
        let mut t = tx(1, 10, TxKind::Expense);
        t.debt_id = Some(7);
        let p = plan(&TxEvent::Deleted(&t));
        assert_eq!(p.recompute_accounts, vec![10]);
        assert_eq!(p.recompute_debts, vec![7]);
    }
}
