// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
    CreditCard,
    Cash,
    Investment,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
            AccountKind::CreditCard => "credit_card",
            AccountKind::Cash => "cash",
            AccountKind::Investment => "investment",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "checking" => AccountKind::Checking,
            "savings" => AccountKind::Savings,
            "credit_card" => AccountKind::CreditCard,
            "cash" => AccountKind::Cash,
            "investment" => AccountKind::Investment,
            other => bail!("Unknown account type '{}'", other),
        })
    }
}

/// Credit-card-only state. Present exactly when `Account.kind == CreditCard`;
/// credit-card operations take this payload instead of poking nullable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardDetails {
    pub credit_limit: Option<Decimal>,
    /// Negative means amount owed for the open billing cycle.
    pub statement_balance: Decimal,
    pub closing_day: Option<u32>,
    pub due_day: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: AccountKind,
    /// Derived: baseline plus the net effect of confirmed transactions.
    pub balance: Decimal,
    /// Balance captured at creation or last manual edit; the starting point
    /// every full recompute builds on.
    pub baseline_balance: Decimal,
    pub currency: String,
    pub is_active: bool,
    pub include_in_total: bool,
    pub credit_card: Option<CreditCardDetails>,
}

impl Account {
    pub fn is_credit_card(&self) -> bool {
        self.kind == AccountKind::CreditCard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Income,
    Expense,
    Transfer,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Transfer => "transfer",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "income" => TxKind::Income,
            "expense" => TxKind::Expense,
            "transfer" => TxKind::Transfer,
            other => bail!("Unknown transaction type '{}'", other),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    pub category_id: Option<i64>,
    /// Destination account; set (and distinct from `account_id`) only for transfers.
    pub transfer_to_account_id: Option<i64>,
    /// Links a payment to a debt.
    pub debt_id: Option<i64>,
    pub kind: TxKind,
    /// Always positive; direction is encoded by `kind`.
    pub amount: Decimal,
    pub description: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub is_confirmed: bool,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
    pub recurring_end_date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub tags: Vec<String>,
}

impl Transaction {
    pub fn is_transfer(&self) -> bool {
        self.kind == TxKind::Transfer
    }

    /// Effect on the owning account: expenses and outgoing transfers are
    /// negative, income is positive.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TxKind::Income => self.amount,
            TxKind::Expense | TxKind::Transfer => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    Loan,
    CreditCard,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::Loan => "loan",
            DebtKind::CreditCard => "credit_card",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "loan" => DebtKind::Loan,
            "credit_card" => DebtKind::CreditCard,
            other => bail!("Unknown debt type '{}'", other),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: DebtKind,
    /// The credit card this installment plan belongs to; required for
    /// `DebtKind::CreditCard`, absent for loans.
    pub account_id: Option<i64>,
    pub total_amount: Decimal,
    pub remaining_amount: Decimal,
    pub monthly_payment: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub due_day: Option<u32>,
    pub total_installments: Option<u32>,
    /// Set exactly while `remaining_amount` is zero.
    pub closed_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub amount: Decimal,
    pub is_active: bool,
    pub threshold_percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub description: String,
    pub amount: Decimal,
    pub day_of_month: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}
