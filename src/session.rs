// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

/// The active user, resolved once per command and passed by reference to
/// every store call. Never ambient state.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
}

pub fn current(conn: &Connection) -> Result<Session> {
    current_opt(conn)?
        .ok_or_else(|| anyhow!("No active session; run 'pocketsage user login --email <email>'"))
}

pub fn current_opt(conn: &Connection) -> Result<Option<Session>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='current_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    let Some(raw) = v else {
        return Ok(None);
    };
    let user_id: i64 = raw
        .parse()
        .with_context(|| format!("Corrupt current_user value '{}'", raw))?;
    let email: Option<String> = conn
        .query_row(
            "SELECT email FROM users WHERE id=?1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()?;
    match email {
        Some(email) => Ok(Some(Session { user_id, email })),
        None => {
            // Session points at a deleted user row; treat as logged out.
            tracing::warn!(user_id, "current_user points at a missing user; clearing session");
            clear(conn)?;
            Ok(None)
        }
    }
}

pub fn login(conn: &Connection, email: &str) -> Result<Session> {
    let row: (i64, String) = conn
        .query_row(
            "SELECT id, email FROM users WHERE email=?1",
            params![email],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .with_context(|| {
            format!("No user with email '{}'; run 'pocketsage user add' first", email)
        })?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('current_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![row.0.to_string()],
    )?;
    Ok(Session {
        user_id: row.0,
        email: row.1,
    })
}

pub fn clear(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key='current_user'", [])?;
    Ok(())
}
