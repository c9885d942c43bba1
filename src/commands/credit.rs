// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CREDIT_PROVIDERS;
use crate::session::Session;
use crate::store;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let score = *sub.get_one::<i64>("score").unwrap();
            let date = match sub.get_one::<String>("date") {
                Some(raw) => parse_date(raw)?,
                None => chrono::Utc::now().date_naive(),
            };
            let provider = sub.get_one::<String>("provider").unwrap();
            store::insert_credit_score(conn, sess, score, date, provider)?;
            println!("Recorded score {} from {} on {}", score, provider, date);
        }
        Some(("list", sub)) => list(conn, sess, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if store::delete_credit_score(conn, sess, id)? {
                println!("Deleted score entry {}", id);
            } else {
                println!("No score entry with id {}", id);
            }
        }
        Some(("providers", _)) => {
            let rows = CREDIT_PROVIDERS
                .iter()
                .map(|p| vec![p.to_string()])
                .collect();
            println!("{}", pretty_table(&["Provider"], rows));
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct ScoreRow {
    id: i64,
    score: i64,
    date: String,
    provider: String,
}

fn list(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<ScoreRow> = store::list_credit_scores(conn, sess)?
        .into_iter()
        .map(|e| ScoreRow {
            id: e.id,
            score: e.score,
            date: e.date.to_string(),
            provider: e.provider,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.score.to_string(),
                    e.date.clone(),
                    e.provider.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Score", "Date", "Provider"], rows));
    }
    Ok(())
}
