// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketsage::models::{AccountKind, TxKind};
use pocketsage::session::Session;
use pocketsage::store::{self, NewAccount, NewTransaction, TxFilter};
use pocketsage::{cli, commands::{exporter, importer}, db};
use rusqlite::Connection;
use tempfile::tempdir;

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
            category: "Groceries".into(),
            amount: "42.50".parse().unwrap(),
            date: date("2025-01-05"),
            account_id: Some(account_id),
            description: Some("weekly run".into()),
        },
    )
    .unwrap();
    store::insert_transaction(
        &conn,
        &sess,
        &NewTransaction {
            kind: TxKind::Income,
            category: "Salary".into(),
            amount: "1000".parse().unwrap(),
            date: date("2025-01-06"),
            account_id: None,
            description: None,
        },
    )
    .unwrap();
    (conn, sess)
}

fn run_export(conn: &Connection, sess: &Session, format: &str, out: &str) {
    let matches = cli::build_cli().get_matches_from([
        "pocketsage",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(conn, sess, export_m).unwrap();
}

#[test]
fn csv_export_is_oldest_first_and_importable_shaped() {
    let (conn, sess) = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("txs.csv");
    run_export(&conn, &sess, "csv", out.to_str().unwrap());

    let body = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "date,type,category,amount,account,description");
    assert_eq!(lines[1], "2025-01-05,expense,Groceries,42.50,Checking,weekly run");
    assert_eq!(lines[2], "2025-01-06,income,Salary,1000,,");
}

#[test]
fn json_export_contains_every_field() {
    let (conn, sess) = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("txs.json");
    run_export(&conn, &sess, "json", out.to_str().unwrap());

    let body = std::fs::read_to_string(&out).unwrap();
    let items: serde_json::Value = serde_json::from_str(&body).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"], "2025-01-05");
    assert_eq!(items[0]["amount"], "42.50");
    assert_eq!(items[0]["account"], "Checking");
    assert_eq!(items[1]["type"], "income");
    assert_eq!(items[1]["description"], serde_json::Value::Null);
}

#[test]
fn export_only_covers_the_session_user() {
    let (conn, sess) = setup();
    let other = store::create_user(&conn, "other@example.com", "Other").unwrap();
    let other_sess = Session {
        user_id: other.id,
        email: other.email,
    };
    let dir = tempdir().unwrap();
    let out = dir.path().join("txs.csv");
    run_export(&conn, &other_sess, "csv", out.to_str().unwrap());

    let body = std::fs::read_to_string(&out).unwrap();
    assert_eq!(body.lines().count(), 1); // header only
}

#[test]
fn csv_export_round_trips_through_import() {
    let (conn, sess) = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("txs.csv");
    run_export(&conn, &sess, "csv", out.to_str().unwrap());

    // Restore into a fresh profile that knows the same account name.
    let mut restored = Connection::open_in_memory().unwrap();
    db::init_schema(&mut restored).unwrap();
    let user = store::create_user(&restored, "restored@example.com", "Restored").unwrap();
    let restored_sess = Session {
        user_id: user.id,
        email: user.email,
    };
    let account_id = store::insert_account(
        &restored,
        &restored_sess,
        &NewAccount {
            name: "Checking".into(),
            kind: AccountKind::Checking,
            institution: None,
            balance: "0".parse().unwrap(),
            is_manual: true,
        },
    )
    .unwrap();

    let matches = cli::build_cli().get_matches_from([
        "pocketsage",
        "import",
        "transactions",
        "--path",
        out.to_str().unwrap(),
    ]);
    let Some(("import", import_m)) = matches.subcommand() else {
        panic!("no import subcommand");
    };
    importer::handle(&mut restored, &restored_sess, import_m).unwrap();

    let originals = store::list_transactions(&conn, &sess, &TxFilter::default()).unwrap();
    let copies = store::list_transactions(&restored, &restored_sess, &TxFilter::default()).unwrap();
    assert_eq!(copies.len(), originals.len());
    for (orig, copy) in originals.iter().zip(&copies) {
        assert_eq!(copy.kind, orig.kind);
        assert_eq!(copy.category, orig.category);
        assert_eq!(copy.amount, orig.amount);
        assert_eq!(copy.date, orig.date);
        assert_eq!(copy.description, orig.description);
    }
    // The income row had no account; the expense row re-resolves by name.
    assert_eq!(copies[0].account_id, None);
    assert_eq!(copies[1].account_id, Some(account_id));
}
