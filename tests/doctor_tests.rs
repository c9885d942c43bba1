// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketsage::models::{AccountKind, TxKind};
use pocketsage::session::Session;
use pocketsage::store::{self, NewAccount, NewTransaction};
use pocketsage::{commands::doctor, db};
use rusqlite::{Connection, params};

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

fn tags(issues: &[(String, String)]) -> Vec<&str> {
    issues.iter().map(|(tag, _)| tag.as_str()).collect()
}

#[test]
fn clean_profile_reports_nothing() {
    let (conn, sess) = setup();
    assert!(doctor::collect_issues(&conn, &sess).unwrap().is_empty());
    doctor::handle(&conn, &sess).unwrap();
}

#[test]
fn removed_account_leaves_a_reported_orphan() {
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
            category: "Groceries".into(),
            amount: "10".parse().unwrap(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            account_id: Some(account_id),
            description: None,
        },
    )
    .unwrap();
    store::delete_account(&conn, &sess, account_id).unwrap();

    let issues = doctor::collect_issues(&conn, &sess).unwrap();
    assert_eq!(tags(&issues), ["orphaned_account_ref"]);
    assert!(issues[0].1.contains(&format!("account {}", account_id)));
}

#[test]
fn legacy_rows_are_flagged() {
    let (conn, sess) = setup();

    // Rows the store would reject, planted directly as legacy data.
    conn.execute(
        "INSERT INTO loans(user_id, name, type, principal, current_balance, interest_rate,
                           monthly_payment, start_date, end_date)
         VALUES (?1, 'Legacy', 'other', '0', '100', '0', '0', '2020-01-01', '2030-01-01')",
        params![sess.user_id],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO goals(user_id, name, type, target_amount, current_amount)
         VALUES (?1, 'Legacy', 'savings', '0', '0')",
        params![sess.user_id],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, type, category, amount, date)
         VALUES (?1, 'expense', 'Misc', '-5', '2025-06-01')",
        params![sess.user_id],
    )
    .unwrap();

    let issues = doctor::collect_issues(&conn, &sess).unwrap();
    let tags = tags(&issues);
    assert!(tags.contains(&"nonpositive_amount"));
    assert!(tags.contains(&"nonpositive_principal"));
    assert!(tags.contains(&"nonpositive_target"));
    // The zero-principal loan also owes more than it borrowed.
    assert!(tags.contains(&"balance_over_principal"));
}

#[test]
fn out_of_range_scores_are_flagged() {
    let (conn, sess) = setup();

    // The schema CHECK rejects this row today; pre-CHECK files can still
    // hold one, so plant it with enforcement off.
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
    conn.execute(
        "INSERT INTO credit_scores(user_id, score, date, provider)
         VALUES (?1, 901, '2025-06-01', 'Equifax')",
        params![sess.user_id],
    )
    .unwrap();

    let issues = doctor::collect_issues(&conn, &sess).unwrap();
    assert_eq!(tags(&issues), ["score_out_of_range"]);
    assert!(issues[0].1.contains("901"));
}

#[test]
fn findings_are_scoped_to_the_session_user() {
    let (conn, sess) = setup();
    conn.execute(
        "INSERT INTO transactions(user_id, type, category, amount, date)
         VALUES (?1, 'expense', 'Misc', '-5', '2025-06-01')",
        params![sess.user_id],
    )
    .unwrap();

    let other = store::create_user(&conn, "other@example.com", "Other").unwrap();
    let other_sess = Session {
        user_id: other.id,
        email: other.email,
    };
    assert!(doctor::collect_issues(&conn, &other_sess).unwrap().is_empty());
    assert_eq!(doctor::collect_issues(&conn, &sess).unwrap().len(), 1);
}
