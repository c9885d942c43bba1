// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::store::{self, TxFilter};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;
use std::collections::HashMap;

pub fn handle(conn: &Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sess, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let names: HashMap<i64, String> = store::list_accounts(conn, sess)?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let mut txs = store::list_transactions(conn, sess, &TxFilter::default())?;
    txs.reverse(); // oldest first, so the file re-imports in order

    // Ids pointing at removed accounts export as blank so the file stays
    // importable.
    let account_of = |id: Option<i64>| -> String {
        id.and_then(|id| names.get(&id).cloned()).unwrap_or_default()
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "category", "amount", "account", "description"])?;
            for t in &txs {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    account_of(t.account_id),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in &txs {
                items.push(json!({
                    "date": t.date.to_string(),
                    "type": t.kind.to_string(),
                    "category": t.category,
                    "amount": t.amount.to_string(),
                    "account": account_of(t.account_id),
                    "description": t.description,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
