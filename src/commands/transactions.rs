// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EXPENSE_CATEGORIES, INCOME_CATEGORIES};
use crate::session::Session;
use crate::store::{self, NewTransaction, TxFilter};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(conn: &Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sess, sub)?,
        Some(("list", sub)) => list(conn, sess, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if store::delete_transaction(conn, sess, id)? {
                println!("Deleted transaction {}", id);
            } else {
                println!("No transaction with id {}", id);
            }
        }
        Some(("categories", _)) => {
            let mut rows = Vec::new();
            for c in EXPENSE_CATEGORIES {
                rows.push(vec!["expense".to_string(), c.to_string()]);
            }
            for c in INCOME_CATEGORIES {
                rows.push(vec!["income".to_string(), c.to_string()]);
            }
            println!("{}", pretty_table(&["Type", "Category"], rows));
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub.get_one::<String>("type").unwrap().parse()?;
    let category = sub.get_one::<String>("category").unwrap().clone();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => chrono::Utc::now().date_naive(),
    };
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(store::account_id_by_name(conn, sess, name)?),
        None => None,
    };
    let description = sub.get_one::<String>("description").map(|s| s.to_string());

    store::insert_transaction(
        conn,
        sess,
        &NewTransaction {
            kind,
            category: category.clone(),
            amount,
            date,
            account_id,
            description,
        },
    )?;
    println!("Recorded {} {} '{}' on {}", kind, amount, category, date);
    Ok(())
}

fn list(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sess, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.account.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Account", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub account: String,
    pub description: String,
}

pub fn query_rows(
    conn: &Connection,
    sess: &Session,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut filter = TxFilter::default();
    if let Some(month) = sub.get_one::<String>("month") {
        filter.month = Some(parse_month(month)?);
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        filter.kind = Some(kind.parse()?);
    }
    if let Some(category) = sub.get_one::<String>("category") {
        filter.category = Some(category.clone());
    }
    if let Some(account) = sub.get_one::<String>("account") {
        filter.account_id = Some(store::account_id_by_name(conn, sess, account)?);
    }
    filter.limit = sub.get_one::<usize>("limit").copied();

    let names: HashMap<i64, String> = store::list_accounts(conn, sess)?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    let rows = store::list_transactions(conn, sess, &filter)?
        .into_iter()
        .map(|t| {
            let account = match t.account_id {
                // A removed account leaves its id behind; doctor reports these.
                Some(id) => names.get(&id).cloned().unwrap_or_else(|| "(removed)".into()),
                None => String::new(),
            };
            TransactionRow {
                id: t.id,
                date: t.date.to_string(),
                kind: t.kind.to_string(),
                category: t.category,
                amount: t.amount.to_string(),
                account,
                description: t.description.unwrap_or_default(),
            }
        })
        .collect();
    Ok(rows)
}
