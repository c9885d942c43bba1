// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pocketsage::{cli, commands, db, session};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        Some(("advisor", sub)) => commands::advisor::handle(sub)?,
        Some((name, sub)) => {
            // Everything else reads or writes user-scoped records.
            let sess = session::current(&conn)?;
            match name {
                "account" => commands::accounts::handle(&conn, &sess, sub)?,
                "tx" => commands::transactions::handle(&conn, &sess, sub)?,
                "loan" => commands::loans::handle(&conn, &sess, sub)?,
                "goal" => commands::goals::handle(&conn, &sess, sub)?,
                "credit" => commands::credit::handle(&conn, &sess, sub)?,
                "dashboard" => commands::dashboard::handle(&conn, &sess, sub)?,
                "import" => commands::importer::handle(&mut conn, &sess, sub)?,
                "export" => commands::exporter::handle(&conn, &sess, sub)?,
                "doctor" => commands::doctor::handle(&conn, &sess)?,
                _ => {
                    cli::build_cli().print_help()?;
                    println!();
                }
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
