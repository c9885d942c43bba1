// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::store::{self, NewAccount};
use crate::utils::{fmt_usd, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = sub.get_one::<String>("type").unwrap().parse()?;
            let institution = sub.get_one::<String>("institution").map(|s| s.to_string());
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            let is_manual = !sub.get_flag("linked");
            store::insert_account(
                conn,
                sess,
                &NewAccount {
                    name: name.clone(),
                    kind,
                    institution,
                    balance,
                    is_manual,
                },
            )?;
            println!("Added account '{}' ({}, {})", name, kind, fmt_usd(&balance));
        }
        Some(("list", sub)) => list(conn, sess, sub)?,
        Some(("set-balance", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            let id = store::account_id_by_name(conn, sess, name)?;
            store::update_account_balance(conn, sess, id, balance)?;
            println!("Balance of '{}' set to {}", name, fmt_usd(&balance));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::account_id_by_name(conn, sess, name)?;
            store::delete_account(conn, sess, id)?;
            println!("Removed account '{}' (its transactions are kept)", name);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct AccountRow {
    id: i64,
    name: String,
    kind: String,
    institution: String,
    balance: rust_decimal::Decimal,
    manual: bool,
}

fn list(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<AccountRow> = store::list_accounts(conn, sess)?
        .into_iter()
        .map(|a| AccountRow {
            id: a.id,
            name: a.name,
            kind: a.kind.to_string(),
            institution: a.institution.unwrap_or_default(),
            balance: a.balance,
            manual: a.is_manual,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.name.clone(),
                    a.kind.clone(),
                    a.institution.clone(),
                    fmt_usd(&a.balance),
                    if a.manual { "manual".into() } else { "linked".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Type", "Institution", "Balance", "Source"],
                rows,
            )
        );
    }
    Ok(())
}
