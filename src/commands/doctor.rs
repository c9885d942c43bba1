// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, sess: &Session) -> Result<()> {
    let issues = collect_issues(conn, sess)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|(issue, detail)| vec![issue, detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

// Reads raw rows on purpose: doctor's job is finding records the store's
// validation would never let in (imports, older schemas, hand edits).
pub fn collect_issues(conn: &Connection, sess: &Session) -> Result<Vec<(String, String)>> {
    let mut issues = Vec::new();

    // 1) Transactions pointing at accounts that no longer exist
    let mut stmt = conn.prepare(
        "SELECT t.id, t.date, t.account_id FROM transactions t
         WHERE t.user_id=?1 AND t.account_id IS NOT NULL
           AND t.account_id NOT IN (SELECT id FROM accounts WHERE user_id=?1)",
    )?;
    let mut cur = stmt.query(params![sess.user_id])?;
    while let Some(r) = cur.next()? {
        let (id, date, account_id): (i64, String, i64) = (r.get(0)?, r.get(1)?, r.get(2)?);
        issues.push((
            "orphaned_account_ref".into(),
            format!("tx {} on {} references account {}", id, date, account_id),
        ));
    }

    // 2) Transactions with non-positive amounts
    let mut stmt = conn.prepare(
        "SELECT id, amount FROM transactions WHERE user_id=?1 AND CAST(amount AS REAL) <= 0",
    )?;
    let mut cur = stmt.query(params![sess.user_id])?;
    while let Some(r) = cur.next()? {
        let (id, amount): (i64, String) = (r.get(0)?, r.get(1)?);
        issues.push((
            "nonpositive_amount".into(),
            format!("tx {} has amount {}", id, amount),
        ));
    }

    // 3) Loans owing more than was borrowed
    let mut stmt = conn.prepare(
        "SELECT id, name FROM loans
         WHERE user_id=?1 AND CAST(current_balance AS REAL) > CAST(principal AS REAL)",
    )?;
    let mut cur = stmt.query(params![sess.user_id])?;
    while let Some(r) = cur.next()? {
        let (id, name): (i64, String) = (r.get(0)?, r.get(1)?);
        issues.push((
            "balance_over_principal".into(),
            format!("loan {} '{}'", id, name),
        ));
    }

    // 4) Loans whose repayment progress is undefined
    let mut stmt = conn.prepare(
        "SELECT id, name FROM loans WHERE user_id=?1 AND CAST(principal AS REAL) <= 0",
    )?;
    let mut cur = stmt.query(params![sess.user_id])?;
    while let Some(r) = cur.next()? {
        let (id, name): (i64, String) = (r.get(0)?, r.get(1)?);
        issues.push((
            "nonpositive_principal".into(),
            format!("loan {} '{}'", id, name),
        ));
    }

    // 5) Goals whose progress is undefined
    let mut stmt = conn.prepare(
        "SELECT id, name FROM goals WHERE user_id=?1 AND CAST(target_amount AS REAL) <= 0",
    )?;
    let mut cur = stmt.query(params![sess.user_id])?;
    while let Some(r) = cur.next()? {
        let (id, name): (i64, String) = (r.get(0)?, r.get(1)?);
        issues.push((
            "nonpositive_target".into(),
            format!("goal {} '{}'", id, name),
        ));
    }

    // 6) Credit scores outside 300..=850 (pre-CHECK rows)
    let mut stmt = conn.prepare(
        "SELECT id, score FROM credit_scores
         WHERE user_id=?1 AND (score < 300 OR score > 850)",
    )?;
    let mut cur = stmt.query(params![sess.user_id])?;
    while let Some(r) = cur.next()? {
        let (id, score): (i64, i64) = (r.get(0)?, r.get(1)?);
        issues.push((
            "score_out_of_range".into(),
            format!("entry {} has score {}", id, score),
        ));
    }

    Ok(issues)
}
