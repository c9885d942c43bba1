// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

// Derived numbers for the dashboard and the list views. Everything here is
// a pure function of its inputs: no connection handle, no clock reads, and
// empty input always yields the identity value instead of an error.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Account, Goal, Loan, Transaction, TxKind};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyFlow {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
}

pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts.iter().map(|a| a.balance).sum()
}

pub fn total_debt(loans: &[Loan]) -> Decimal {
    loans.iter().map(|l| l.current_balance).sum()
}

pub fn net_worth(accounts: &[Account], loans: &[Loan]) -> Decimal {
    total_balance(accounts) - total_debt(loans)
}

pub fn current_month(txs: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
    txs.iter()
        .filter(|t| t.date.year() == today.year() && t.date.month() == today.month())
        .cloned()
        .collect()
}

pub fn sum_by_kind(txs: &[Transaction], kind: TxKind) -> Decimal {
    txs.iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Expense totals per category, largest first, truncated to `n`. Ties keep
/// the order in which a category was first seen (stable sort over groups
/// built in encounter order), so equal sums render deterministically.
pub fn top_categories(txs: &[Transaction], n: usize) -> Vec<CategoryTotal> {
    let mut groups: Vec<CategoryTotal> = Vec::new();
    for t in txs.iter().filter(|t| t.kind == TxKind::Expense) {
        match groups.iter_mut().find(|g| g.category == t.category) {
            Some(g) => g.total += t.amount,
            None => groups.push(CategoryTotal {
                category: t.category.clone(),
                total: t.amount,
            }),
        }
    }
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups.truncate(n);
    groups
}

/// Income/expense sums bucketed by calendar month for the trailing `months`
/// months ending at `today`'s month inclusive, oldest first. Always returns
/// exactly `months` entries; months with no transactions carry zero sums.
pub fn monthly_series(txs: &[Transaction], months: usize, today: NaiveDate) -> Vec<MonthlyFlow> {
    let mut out = Vec::with_capacity(months);
    for back in (0..months).rev() {
        let (y, m) = shift_month(today.year(), today.month(), -(back as i32));
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for t in txs {
            if t.date.year() == y && t.date.month() == m {
                match t.kind {
                    TxKind::Income => income += t.amount,
                    TxKind::Expense => expenses += t.amount,
                }
            }
        }
        out.push(MonthlyFlow {
            month: format!("{:04}-{:02}", y, m),
            income,
            expenses,
        });
    }
    out
}

pub fn loan_progress(loan: &Loan) -> Decimal {
    // Guard: rows with a non-positive principal (imported or legacy) must
    // not divide by zero.
    if loan.principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (loan.principal - loan.current_balance) / loan.principal * Decimal::ONE_HUNDRED
}

/// Calendar months between `today` and `end_date`, ignoring day-of-month,
/// floored at zero for end dates in the past.
pub fn months_remaining(end_date: NaiveDate, today: NaiveDate) -> i64 {
    let diff = (i64::from(end_date.year()) - i64::from(today.year())) * 12
        + (i64::from(end_date.month()) - i64::from(today.month()));
    diff.max(0)
}

pub fn goal_progress(goal: &Goal) -> Decimal {
    if goal.target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let pct = goal.current_amount / goal.target_amount * Decimal::ONE_HUNDRED;
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

pub fn savings_rate(income: Decimal, expenses: Decimal) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (income - expenses) / income * Decimal::ONE_HUNDRED
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + (month as i32 - 1) + delta;
    (zero_based.div_euclid(12), (zero_based.rem_euclid(12) + 1) as u32)
}
