// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketsage::commands::dashboard;
use pocketsage::db;
use pocketsage::models::{AccountKind, GoalKind, LoanKind, TxKind};
use pocketsage::session::Session;
use pocketsage::store::{self, NewAccount, NewGoal, NewLoan, NewTransaction};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> (Connection, Session) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let user = store::create_user(&conn, "test@example.com", "Test").unwrap();
    let sess = Session {
        user_id: user.id,
        email: user.email,
    };
    (conn, sess)
}

fn expense(category: &str, amount: &str, on: &str) -> NewTransaction {
    NewTransaction {
        kind: TxKind::Expense,
        category: category.into(),
        amount: dec(amount),
        date: date(on),
        account_id: None,
        description: None,
    }
}

fn populate(conn: &Connection, sess: &Session) {
    store::insert_account(
        conn,
        sess,
        &NewAccount {
            name: "Checking".into(),
            kind: AccountKind::Checking,
            institution: Some("First Local".into()),
            balance: dec("5000"),
            is_manual: true,
        },
    )
    .unwrap();
    store::insert_account(
        conn,
        sess,
        &NewAccount {
            name: "Card".into(),
            kind: AccountKind::CreditCard,
            institution: None,
            balance: dec("-500"),
            is_manual: true,
        },
    )
    .unwrap();
    store::insert_loan(
        conn,
        sess,
        &NewLoan {
            name: "Car".into(),
            kind: LoanKind::Auto,
            principal: dec("20000"),
            current_balance: dec("15000"),
            interest_rate: dec("6.5"),
            monthly_payment: dec("400"),
            start_date: date("2024-01-01"),
            end_date: date("2026-04-30"),
        },
    )
    .unwrap();
    store::insert_goal(
        conn,
        sess,
        &NewGoal {
            name: "House".into(),
            kind: GoalKind::Savings,
            target_amount: dec("3000"),
            current_amount: dec("600"),
            target_date: Some(date("2026-01-01")),
        },
    )
    .unwrap();
    store::insert_credit_score(conn, sess, 700, date("2025-05-01"), "Equifax").unwrap();
    store::insert_credit_score(conn, sess, 720, date("2025-06-01"), "Experian").unwrap();

    store::insert_transaction(
        conn,
        sess,
        &NewTransaction {
            kind: TxKind::Income,
            category: "Salary".into(),
            amount: dec("4000"),
            date: date("2025-06-01"),
            account_id: None,
            description: None,
        },
    )
    .unwrap();
    store::insert_transaction(conn, sess, &expense("Groceries", "300", "2025-06-03")).unwrap();
    store::insert_transaction(conn, sess, &expense("Dining", "100", "2025-06-05")).unwrap();
    store::insert_transaction(conn, sess, &expense("Groceries", "200", "2025-06-10")).unwrap();
    // Previous month, should appear in the trend but not this month's sums.
    store::insert_transaction(conn, sess, &expense("Rent", "1500", "2025-05-02")).unwrap();
}

#[test]
fn summary_aggregates_the_whole_picture() {
    let (conn, sess) = setup();
    populate(&conn, &sess);
    let today = date("2025-06-15");

    let s = dashboard::build_summary(&conn, &sess, today, 6, 5);

    assert_eq!(s.month, "2025-06");
    assert_eq!(s.total_balance, dec("4500"));
    assert_eq!(s.total_debt, dec("15000"));
    assert_eq!(s.net_worth, dec("-10500"));
    assert_eq!(s.month_income, dec("4000"));
    assert_eq!(s.month_expenses, dec("600"));
    assert_eq!(s.savings_rate_pct, dec("85"));

    let names: Vec<&str> = s.top_categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, ["Groceries", "Dining"]);
    assert_eq!(s.top_categories[0].total, dec("500"));

    assert_eq!(s.trend.len(), 6);
    assert_eq!(s.trend[0].month, "2025-01");
    assert_eq!(s.trend[4].month, "2025-05");
    assert_eq!(s.trend[4].expenses, dec("1500"));
    assert_eq!(s.trend[5].month, "2025-06");
    assert_eq!(s.trend[5].income, dec("4000"));

    assert_eq!(s.loans.len(), 1);
    assert_eq!(s.loans[0].progress_pct, dec("25"));
    assert_eq!(s.loans[0].months_remaining, 10);

    assert_eq!(s.goals.len(), 1);
    assert_eq!(s.goals[0].progress_pct, dec("20"));

    assert_eq!(s.latest_score, Some(720));
}

#[test]
fn summary_on_an_empty_profile_is_all_zeros() {
    let (conn, sess) = setup();
    let s = dashboard::build_summary(&conn, &sess, date("2025-06-15"), 6, 5);

    assert_eq!(s.net_worth, Decimal::ZERO);
    assert_eq!(s.month_income, Decimal::ZERO);
    assert_eq!(s.month_expenses, Decimal::ZERO);
    assert_eq!(s.savings_rate_pct, Decimal::ZERO);
    assert!(s.top_categories.is_empty());
    assert_eq!(s.trend.len(), 6);
    assert!(s.loans.is_empty());
    assert!(s.goals.is_empty());
    assert_eq!(s.latest_score, None);
}

#[test]
fn summary_serializes_for_the_json_flag() {
    let (conn, sess) = setup();
    populate(&conn, &sess);
    let s = dashboard::build_summary(&conn, &sess, date("2025-06-15"), 6, 5);

    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["month"], "2025-06");
    assert_eq!(v["latest_score"], 720);
    assert_eq!(v["trend"].as_array().unwrap().len(), 6);
    // Money serializes as exact decimal strings.
    assert_eq!(v["net_worth"], "-10500");
}

#[test]
fn summary_only_sees_the_session_users_records() {
    let (conn, sess) = setup();
    populate(&conn, &sess);
    let other = store::create_user(&conn, "other@example.com", "Other").unwrap();
    let other_sess = Session {
        user_id: other.id,
        email: other.email,
    };

    let s = dashboard::build_summary(&conn, &other_sess, date("2025-06-15"), 6, 5);
    assert_eq!(s.net_worth, Decimal::ZERO);
    assert!(s.top_categories.is_empty());
    assert_eq!(s.latest_score, None);
}
