// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketsage::{db, session, store};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn login_requires_an_existing_profile() {
    let conn = setup();
    let err = session::login(&conn, "nobody@example.com").unwrap_err();
    assert!(err.to_string().contains("nobody@example.com"));
}

#[test]
fn login_logout_round_trip() {
    let conn = setup();
    store::create_user(&conn, "a@example.com", "A").unwrap();

    assert!(session::current_opt(&conn).unwrap().is_none());
    let sess = session::login(&conn, "a@example.com").unwrap();
    assert_eq!(sess.email, "a@example.com");

    let resolved = session::current(&conn).unwrap();
    assert_eq!(resolved.user_id, sess.user_id);

    session::clear(&conn).unwrap();
    assert!(session::current_opt(&conn).unwrap().is_none());
    let err = session::current(&conn).unwrap_err();
    assert!(err.to_string().contains("No active session"));
}

#[test]
fn login_switches_between_profiles() {
    let conn = setup();
    store::create_user(&conn, "a@example.com", "A").unwrap();
    store::create_user(&conn, "b@example.com", "B").unwrap();

    session::login(&conn, "a@example.com").unwrap();
    session::login(&conn, "b@example.com").unwrap();
    assert_eq!(session::current(&conn).unwrap().email, "b@example.com");
}

#[test]
fn stale_session_is_treated_as_logged_out() {
    let conn = setup();
    let user = store::create_user(&conn, "a@example.com", "A").unwrap();
    session::login(&conn, "a@example.com").unwrap();

    conn.execute("DELETE FROM users WHERE id=?1", [user.id]).unwrap();
    assert!(session::current_opt(&conn).unwrap().is_none());
    // And the dangling pointer is gone afterwards.
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='current_user'",
            [],
            |r| r.get(0),
        )
        .ok();
    assert!(v.is_none());
}
