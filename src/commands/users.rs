// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let user = store::create_user(conn, email, name)?;
            println!("Added user '{}' <{}>", user.name, user.email);
            // First profile on a fresh database becomes the session.
            if session::current_opt(conn)?.is_none() {
                session::login(conn, &user.email)?;
                println!("Logged in as {}", user.email);
            }
        }
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let sess = session::login(conn, email)?;
            println!("Logged in as {}", sess.email);
        }
        Some(("logout", _)) => {
            session::clear(conn)?;
            println!("Logged out");
        }
        Some(("whoami", _)) => match session::current_opt(conn)? {
            Some(sess) => println!("{}", sess.email),
            None => println!("Not logged in"),
        },
        Some(("list", _)) => {
            let users = store::list_users(conn)?;
            let active = session::current_opt(conn)?.map(|s| s.user_id);
            let rows = users
                .iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.email.clone(),
                        u.name.clone(),
                        if active == Some(u.id) { "*".into() } else { String::new() },
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["ID", "Email", "Name", "Active"], rows));
        }
        _ => {}
    }
    Ok(())
}
