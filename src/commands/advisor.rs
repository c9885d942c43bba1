// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor;
use anyhow::Result;
use std::io::{self, BufRead, Write};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ask", sub)) => {
            let text = sub
                .get_many::<String>("text")
                .unwrap()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}", advisor::respond(&text));
        }
        Some(("chat", _)) => chat()?,
        _ => {}
    }
    Ok(())
}

fn chat() -> Result<()> {
    println!("Ask me about budgets, saving, debt, or credit. 'quit' to leave.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        println!("{}", advisor::respond(line));
    }
    Ok(())
}
