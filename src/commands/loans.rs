// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::agg;
use crate::session::Session;
use crate::store::{self, NewLoan};
use crate::utils::{fmt_pct, fmt_usd, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sess, sub)?,
        Some(("list", sub)) => list(conn, sess, sub)?,
        Some(("set-balance", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            if store::update_loan_balance(conn, sess, id, balance)? {
                println!("Loan {} balance set to {}", id, fmt_usd(&balance));
            } else {
                println!("No loan with id {}", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if store::delete_loan(conn, sess, id)? {
                println!("Removed loan {}", id);
            } else {
                println!("No loan with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().clone();
    let kind = sub.get_one::<String>("type").unwrap().parse()?;
    let principal = parse_decimal(sub.get_one::<String>("principal").unwrap())?;
    let current_balance = match sub.get_one::<String>("balance") {
        Some(raw) => parse_decimal(raw)?,
        None => principal,
    };
    let interest_rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let monthly_payment = parse_decimal(sub.get_one::<String>("payment").unwrap())?;
    let start_date = match sub.get_one::<String>("start") {
        Some(raw) => parse_date(raw)?,
        None => chrono::Utc::now().date_naive(),
    };
    let end_date = parse_date(sub.get_one::<String>("end").unwrap())?;

    store::insert_loan(
        conn,
        sess,
        &NewLoan {
            name: name.clone(),
            kind,
            principal,
            current_balance,
            interest_rate,
            monthly_payment,
            start_date,
            end_date,
        },
    )?;
    println!("Added loan '{}' ({}, {})", name, kind, fmt_usd(&principal));
    Ok(())
}

#[derive(Serialize)]
struct LoanRow {
    id: i64,
    name: String,
    kind: String,
    principal: rust_decimal::Decimal,
    balance: rust_decimal::Decimal,
    rate: rust_decimal::Decimal,
    payment: rust_decimal::Decimal,
    progress_pct: rust_decimal::Decimal,
    months_remaining: i64,
}

fn list(conn: &Connection, sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Utc::now().date_naive();
    let data: Vec<LoanRow> = store::list_loans(conn, sess)?
        .into_iter()
        .map(|l| LoanRow {
            id: l.id,
            name: l.name.clone(),
            kind: l.kind.to_string(),
            principal: l.principal,
            balance: l.current_balance,
            rate: l.interest_rate,
            payment: l.monthly_payment,
            progress_pct: agg::loan_progress(&l),
            months_remaining: agg::months_remaining(l.end_date, today),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|l| {
                vec![
                    l.id.to_string(),
                    l.name.clone(),
                    l.kind.clone(),
                    fmt_usd(&l.principal),
                    fmt_usd(&l.balance),
                    fmt_pct(&l.rate),
                    fmt_usd(&l.payment),
                    fmt_pct(&l.progress_pct),
                    l.months_remaining.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Name", "Type", "Principal", "Balance", "Rate", "Payment", "Paid",
                    "Months left",
                ],
                rows,
            )
        );
    }
    Ok(())
}
