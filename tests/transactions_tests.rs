// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketsage::models::{AccountKind, TxKind};
use pocketsage::session::Session;
use pocketsage::store::{self, NewAccount, NewTransaction};
use pocketsage::{cli, commands::transactions, db};
use rusqlite::Connection;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> (Connection, Session) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let user = store::create_user(&conn, "test@example.com", "Test").unwrap();
    let sess = Session {
        user_id: user.id,
        email: user.email,
    };
    for i in 1..=3 {
        store::insert_transaction(
            &conn,
            &sess,
            &NewTransaction {
                kind: TxKind::Expense,
                category: "Groceries".into(),
                amount: "10".parse().unwrap(),
                date: date(&format!("2025-01-0{}", i)),
                account_id: None,
                description: None,
            },
        )
        .unwrap();
    }
    (conn, sess)
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["pocketsage", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let (conn, sess) = setup();
    let rows = transactions::query_rows(&conn, &sess, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_is_newest_first() {
    let (conn, sess) = setup();
    let rows = transactions::query_rows(&conn, &sess, &list_matches(&[])).unwrap();
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2025-01-03", "2025-01-02", "2025-01-01"]);
}

#[test]
fn month_filter_validates_and_filters() {
    let (conn, sess) = setup();
    let rows =
        transactions::query_rows(&conn, &sess, &list_matches(&["--month", "2025-01"])).unwrap();
    assert_eq!(rows.len(), 3);
    let rows =
        transactions::query_rows(&conn, &sess, &list_matches(&["--month", "2025-02"])).unwrap();
    assert!(rows.is_empty());
    let err = transactions::query_rows(&conn, &sess, &list_matches(&["--month", "Jan 2025"]))
        .unwrap_err();
    assert!(err.to_string().contains("Invalid month"));
}

#[test]
fn type_filter_narrows_to_income() {
    let (conn, sess) = setup();
    store::insert_transaction(
        &conn,
        &sess,
        &NewTransaction {
            kind: TxKind::Income,
            category: "Salary".into(),
            amount: "4000".parse().unwrap(),
            date: date("2025-01-04"),
            account_id: None,
            description: None,
        },
    )
    .unwrap();
    let rows =
        transactions::query_rows(&conn, &sess, &list_matches(&["--type", "income"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Salary");
}

#[test]
fn account_filter_resolves_names() {
    let (conn, sess) = setup();
    let account_id = store::insert_account(
        &conn,
        &sess,
        &NewAccount {
            name: "Checking".into(),
            kind: AccountKind::Checking,
            institution: None,
            balance: "0".parse().unwrap(),
            is_manual: true,
        },
    )
    .unwrap();
    store::insert_transaction(
        &conn,
        &sess,
        &NewTransaction {
            kind: TxKind::Expense,
            category: "Dining".into(),
            amount: "25".parse().unwrap(),
            date: date("2025-01-05"),
            account_id: Some(account_id),
            description: Some("lunch".into()),
        },
    )
    .unwrap();

    let rows =
        transactions::query_rows(&conn, &sess, &list_matches(&["--account", "Checking"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].account, "Checking");
    assert_eq!(rows[0].description, "lunch");

    let err = transactions::query_rows(&conn, &sess, &list_matches(&["--account", "Nope"]))
        .unwrap_err();
    assert!(err.to_string().contains("Account 'Nope' not found"));
}
