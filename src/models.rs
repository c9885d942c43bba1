// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const CREDIT_SCORE_MIN: i64 = 300;
pub const CREDIT_SCORE_MAX: i64 = 850;

// Suggestion lists surfaced by `tx categories` / `credit providers`.
// Categories stay free text; these are only the pre-seeded picks.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Housing",
    "Utilities",
    "Groceries",
    "Dining",
    "Transport",
    "Healthcare",
    "Insurance",
    "Entertainment",
    "Shopping",
    "Travel",
    "Education",
    "Subscriptions",
    "Other",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Bonus",
    "Freelance",
    "Interest",
    "Dividends",
    "Rental",
    "Gift",
    "Other",
];

pub const CREDIT_PROVIDERS: &[&str] =
    &["Equifax", "Experian", "TransUnion", "FICO", "VantageScore"];

#[derive(Debug, Error)]
#[error("unknown {what} '{value}' (expected {allowed})")]
pub struct ParseKindError {
    what: &'static str,
    value: String,
    allowed: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
    CreditCard,
    Investment,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
            AccountKind::CreditCard => "credit_card",
            AccountKind::Investment => "investment",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            "credit_card" => Ok(AccountKind::CreditCard),
            "investment" => Ok(AccountKind::Investment),
            _ => Err(ParseKindError {
                what: "account type",
                value: s.to_string(),
                allowed: "checking|savings|credit_card|investment",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            _ => Err(ParseKindError {
                what: "transaction type",
                value: s.to_string(),
                allowed: "income|expense",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    Mortgage,
    Auto,
    Student,
    Personal,
    Other,
}

impl LoanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LoanKind::Mortgage => "mortgage",
            LoanKind::Auto => "auto",
            LoanKind::Student => "student",
            LoanKind::Personal => "personal",
            LoanKind::Other => "other",
        }
    }
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mortgage" => Ok(LoanKind::Mortgage),
            "auto" => Ok(LoanKind::Auto),
            "student" => Ok(LoanKind::Student),
            "personal" => Ok(LoanKind::Personal),
            "other" => Ok(LoanKind::Other),
            _ => Err(ParseKindError {
                what: "loan type",
                value: s.to_string(),
                allowed: "mortgage|auto|student|personal|other",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Savings,
    Debt,
    Investment,
}

impl GoalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalKind::Savings => "savings",
            GoalKind::Debt => "debt",
            GoalKind::Investment => "investment",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings" => Ok(GoalKind::Savings),
            "debt" => Ok(GoalKind::Debt),
            "investment" => Ok(GoalKind::Investment),
            _ => Err(ParseKindError {
                what: "goal type",
                value: s.to_string(),
                allowed: "savings|debt|investment",
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: AccountKind,
    pub institution: Option<String>,
    pub balance: Decimal,
    pub is_manual: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: TxKind,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub account_id: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub name: String,
    pub kind: LoanKind,
    pub principal: Decimal,
    pub current_balance: Decimal,
    pub interest_rate: Decimal,
    pub monthly_payment: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub kind: GoalKind,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditScoreEntry {
    pub id: i64,
    pub score: i64,
    pub date: NaiveDate,
    pub provider: String,
}
