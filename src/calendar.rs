// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly commitment calendar: fixed expenses, loan payments, and per-card
//! credit payments merged into one day-ordered list with subtotals. Pure
//! composition over already-loaded rows; nothing here touches storage.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Account, Debt, DebtKind, FixedExpense};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentKind {
    FixedExpense,
    Loan,
    CreditCard,
}

impl CommitmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitmentKind::FixedExpense => "fixed_expense",
            CommitmentKind::Loan => "loan",
            CommitmentKind::CreditCard => "credit_card",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitmentEntry {
    pub name: String,
    pub amount: Decimal,
    pub day: u32,
    pub kind: CommitmentKind,
}

#[derive(Debug, Serialize)]
pub struct MonthlyCommitments {
    pub entries: Vec<CommitmentEntry>,
    pub fixed_total: Decimal,
    pub loan_total: Decimal,
    pub credit_card_total: Decimal,
    /// Always `fixed_total + loan_total + credit_card_total`.
    pub grand_total: Decimal,
}

/// Builds the calendar for one month of commitments.
///
/// Loans land on their own `due_day`; credit-card installment debts are
/// grouped per card, because what actually gets paid is the card's total on
/// the account's `due_day`. Missing due days default to the 1st.
pub fn monthly_commitments(
    fixed: &[FixedExpense],
    debts: &[Debt],
    accounts: &[Account],
) -> MonthlyCommitments {
    let mut entries = Vec::new();
    let mut fixed_total = Decimal::ZERO;
    let mut loan_total = Decimal::ZERO;
    let mut credit_card_total = Decimal::ZERO;

    for fe in fixed.iter().filter(|fe| fe.is_active) {
        fixed_total += fe.amount;
        entries.push(CommitmentEntry {
            name: fe.description.clone(),
            amount: fe.amount,
            day: fe.day_of_month,
            kind: CommitmentKind::FixedExpense,
        });
    }

    let open = |d: &&Debt| d.remaining_amount > Decimal::ZERO;

    for debt in debts.iter().filter(open).filter(|d| d.kind == DebtKind::Loan) {
        let amount = debt.monthly_payment.unwrap_or(Decimal::ZERO);
        loan_total += amount;
        entries.push(CommitmentEntry {
            name: debt.name.clone(),
            amount,
            day: debt.due_day.unwrap_or(1),
            kind: CommitmentKind::Loan,
        });
    }

    // One entry per card, not per installment plan.
    let mut per_card: Vec<(Option<i64>, Decimal)> = Vec::new();
    for debt in debts
        .iter()
        .filter(open)
        .filter(|d| d.kind == DebtKind::CreditCard)
    {
        let amount = debt.monthly_payment.unwrap_or(Decimal::ZERO);
        match per_card.iter_mut().find(|(id, _)| *id == debt.account_id) {
            Some((_, sum)) => *sum += amount,
            None => per_card.push((debt.account_id, amount)),
        }
    }
    for (account_id, amount) in per_card {
        let account = account_id.and_then(|id| accounts.iter().find(|a| a.id == id));
        let name = account
            .map(|a| format!("{} payment", a.name))
            .unwrap_or_else(|| "Credit card payment".to_string());
        let day = account
            .and_then(|a| a.credit_card.as_ref())
            .and_then(|cc| cc.due_day)
            .unwrap_or(1);
        credit_card_total += amount;
        entries.push(CommitmentEntry {
            name,
            amount,
            day,
            kind: CommitmentKind::CreditCard,
        });
    }

    entries.sort_by_key(|e| e.day);

    MonthlyCommitments {
        entries,
        fixed_total,
        loan_total,
        credit_card_total,
        grand_total: fixed_total + loan_total + credit_card_total,
    }
}
