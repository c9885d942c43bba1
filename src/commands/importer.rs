// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::store::{self, NewTransaction};
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use std::collections::{HashMap, hash_map::Entry};

pub fn handle(conn: &mut Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sess, sub),
        _ => Ok(()),
    }
}

fn import_transactions(
    conn: &mut Connection,
    sess: &Session,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    // All or nothing: a bad row rolls back the whole file.
    let tx = conn.transaction()?;
    let mut account_cache: HashMap<String, i64> = HashMap::new();
    let mut imported = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let row = i + 2; // 1-based, after the header line
        let rec = result.with_context(|| format!("Row {}: unreadable record", row))?;
        let date_raw = rec.get(0).with_context(|| format!("Row {}: date missing", row))?.trim();
        let kind_raw = rec.get(1).with_context(|| format!("Row {}: type missing", row))?.trim();
        let category = rec
            .get(2)
            .with_context(|| format!("Row {}: category missing", row))?
            .trim()
            .to_string();
        let amount_raw = rec
            .get(3)
            .with_context(|| format!("Row {}: amount missing", row))?
            .trim();
        let account = rec.get(4).unwrap_or("").trim().to_string();
        let description = rec
            .get(5)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let date = parse_date(date_raw).with_context(|| format!("Row {}: bad date", row))?;
        let kind = kind_raw
            .parse()
            .with_context(|| format!("Row {}: bad type", row))?;
        let amount =
            parse_decimal(amount_raw).with_context(|| format!("Row {}: bad amount", row))?;

        let account_id = if account.is_empty() {
            None
        } else {
            let id = match account_cache.entry(account.clone()) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let fetched = store::account_id_by_name(&tx, sess, &account)
                        .with_context(|| format!("Row {}", row))?;
                    *entry.insert(fetched)
                }
            };
            Some(id)
        };

        store::insert_transaction(
            &tx,
            sess,
            &NewTransaction {
                kind,
                category,
                amount,
                date,
                account_id,
                description,
            },
        )
        .with_context(|| format!("Row {}", row))?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
