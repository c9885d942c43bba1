// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::agg::{self, CategoryTotal, MonthlyFlow};
use crate::session::Session;
use crate::store;
use crate::utils::{fetch_or_empty, fmt_pct, fmt_usd, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let months = *m.get_one::<usize>("months").unwrap();
    let top = *m.get_one::<usize>("top").unwrap();
    let today = chrono::Utc::now().date_naive();

    let summary = build_summary(conn, sess, today, months, top);
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        render(&summary);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct LoanBrief {
    pub name: String,
    pub balance: Decimal,
    pub progress_pct: Decimal,
    pub months_remaining: i64,
}

#[derive(Serialize)]
pub struct GoalBrief {
    pub name: String,
    pub current: Decimal,
    pub target: Decimal,
    pub progress_pct: Decimal,
}

#[derive(Serialize)]
pub struct DashboardSummary {
    pub month: String,
    pub total_balance: Decimal,
    pub total_debt: Decimal,
    pub net_worth: Decimal,
    pub month_income: Decimal,
    pub month_expenses: Decimal,
    pub savings_rate_pct: Decimal,
    pub top_categories: Vec<CategoryTotal>,
    pub trend: Vec<MonthlyFlow>,
    pub loans: Vec<LoanBrief>,
    pub goals: Vec<GoalBrief>,
    pub latest_score: Option<i64>,
}

/// Assembles the whole dashboard from the store. Each collection is fetched
/// independently; a failed fetch is logged and rendered as empty rather than
/// taking the rest of the dashboard down.
pub fn build_summary(
    conn: &Connection,
    sess: &Session,
    today: NaiveDate,
    months: usize,
    top: usize,
) -> DashboardSummary {
    let accounts = fetch_or_empty("accounts", store::list_accounts(conn, sess));
    let txs = fetch_or_empty(
        "transactions",
        store::list_transactions(conn, sess, &store::TxFilter::default()),
    );
    let loans = fetch_or_empty("loans", store::list_loans(conn, sess));
    let goals = fetch_or_empty("goals", store::list_goals(conn, sess));
    let scores = fetch_or_empty("credit scores", store::list_credit_scores(conn, sess));

    let this_month = agg::current_month(&txs, today);
    let month_income = agg::sum_by_kind(&this_month, crate::models::TxKind::Income);
    let month_expenses = agg::sum_by_kind(&this_month, crate::models::TxKind::Expense);

    DashboardSummary {
        month: today.format("%Y-%m").to_string(),
        total_balance: agg::total_balance(&accounts),
        total_debt: agg::total_debt(&loans),
        net_worth: agg::net_worth(&accounts, &loans),
        month_income,
        month_expenses,
        savings_rate_pct: agg::savings_rate(month_income, month_expenses),
        top_categories: agg::top_categories(&this_month, top),
        trend: agg::monthly_series(&txs, months, today),
        loans: loans
            .iter()
            .map(|l| LoanBrief {
                name: l.name.clone(),
                balance: l.current_balance,
                progress_pct: agg::loan_progress(l),
                months_remaining: agg::months_remaining(l.end_date, today),
            })
            .collect(),
        goals: goals
            .iter()
            .map(|g| GoalBrief {
                name: g.name.clone(),
                current: g.current_amount,
                target: g.target_amount,
                progress_pct: agg::goal_progress(g),
            })
            .collect(),
        // Scores come back newest first.
        latest_score: scores.first().map(|s| s.score),
    }
}

fn render(s: &DashboardSummary) {
    println!(
        "{}",
        pretty_table(
            &["Assets", "Debt", "Net worth"],
            vec![vec![
                fmt_usd(&s.total_balance),
                fmt_usd(&s.total_debt),
                fmt_usd(&s.net_worth),
            ]],
        )
    );

    println!("\nThis month ({})", s.month);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Savings rate"],
            vec![vec![
                fmt_usd(&s.month_income),
                fmt_usd(&s.month_expenses),
                fmt_pct(&s.savings_rate_pct),
            ]],
        )
    );

    if !s.top_categories.is_empty() {
        println!("\nTop spending");
        let rows = s
            .top_categories
            .iter()
            .map(|c| vec![c.category.clone(), fmt_usd(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    println!("\nTrend");
    let rows = s
        .trend
        .iter()
        .map(|f| {
            vec![
                f.month.clone(),
                fmt_usd(&f.income),
                fmt_usd(&f.expenses),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expenses"], rows));

    if !s.loans.is_empty() {
        println!("\nLoans");
        let rows = s
            .loans
            .iter()
            .map(|l| {
                vec![
                    l.name.clone(),
                    fmt_usd(&l.balance),
                    fmt_pct(&l.progress_pct),
                    l.months_remaining.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Balance", "Paid", "Months left"], rows)
        );
    }

    if !s.goals.is_empty() {
        println!("\nGoals");
        let rows = s
            .goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    fmt_usd(&g.current),
                    fmt_usd(&g.target),
                    fmt_pct(&g.progress_pct),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Current", "Target", "Progress"], rows)
        );
    }

    if let Some(score) = s.latest_score {
        println!("\nLatest credit score: {}", score);
    }
}
