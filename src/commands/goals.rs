// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::agg;
use crate::session::Session;
use crate::store::{self, NewGoal};
use crate::utils::{fmt_pct, fmt_usd, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().clone();
            let kind = sub.get_one::<String>("type").unwrap().parse()?;
            let target_amount = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            let current_amount = parse_decimal(sub.get_one::<String>("current").unwrap())?;
            let target_date = match sub.get_one::<String>("date") {
                Some(raw) => Some(parse_date(raw)?),
                None => None,
            };
            store::insert_goal(
                conn,
                sess,
                &NewGoal {
                    name: name.clone(),
                    kind,
                    target_amount,
                    current_amount,
                    target_date,
                },
            )?;
            println!("Added goal '{}' ({}, {})", name, kind, fmt_usd(&target_amount));
        }
        Some(("list", sub)) => list(conn, sess, sub)?,
        Some(("set-current", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            if store::update_goal_current(conn, sess, id, amount)? {
                println!("Goal {} set to {}", id, fmt_usd(&amount));
            } else {
                println!("No goal with id {}", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if store::delete_goal(conn, sess, id)? {
                println!("Removed goal {}", id);
            } else {
                println!("No goal with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    id: i64,
    name: String,
    kind: String,
    target: rust_decimal::Decimal,
    current: rust_decimal::Decimal,
    progress_pct: rust_decimal::Decimal,
    target_date: String,
}

fn list(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<GoalRow> = store::list_goals(conn, sess)?
        .into_iter()
        .map(|g| GoalRow {
            id: g.id,
            name: g.name.clone(),
            kind: g.kind.to_string(),
            target: g.target_amount,
            current: g.current_amount,
            progress_pct: agg::goal_progress(&g),
            target_date: g.target_date.map(|d| d.to_string()).unwrap_or_default(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    g.kind.clone(),
                    fmt_usd(&g.target),
                    fmt_usd(&g.current),
                    fmt_pct(&g.progress_pct),
                    g.target_date.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Type", "Target", "Current", "Progress", "By"],
                rows,
            )
        );
    }
    Ok(())
}
