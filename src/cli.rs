// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print JSON instead of a table")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print one JSON object per line")
            .action(ArgAction::SetTrue),
    )
}

pub fn build_cli() -> Command {
    Command::new("pocketsage")
        .version(crate_version!())
        .about("Track accounts, transactions, loans, goals, and credit history from the terminal")
        .subcommand(
            Command::new("init").about("Create the database if missing and print its location"),
        )
        .subcommand(user_cmd())
        .subcommand(account_cmd())
        .subcommand(tx_cmd())
        .subcommand(loan_cmd())
        .subcommand(goal_cmd())
        .subcommand(credit_cmd())
        .subcommand(dashboard_cmd())
        .subcommand(advisor_cmd())
        .subcommand(import_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check stored records for inconsistencies"))
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Manage user profiles and the active session")
        .subcommand(
            Command::new("add")
                .about("Create a user profile")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(
            Command::new("login")
                .about("Make a profile the active session")
                .arg(Arg::new("email").long("email").required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the active session"))
        .subcommand(Command::new("whoami").about("Show the active session"))
        .subcommand(Command::new("list").about("List user profiles"))
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Track balances across checking, savings, credit cards, and investments")
        .subcommand(
            Command::new("add")
                .about("Add an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("checking|savings|credit_card|investment"),
                )
                .arg(Arg::new("institution").long("institution"))
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .default_value("0")
                        .allow_negative_numbers(true)
                        .help("Starting balance; may be negative for credit cards"),
                )
                .arg(
                    Arg::new("linked")
                        .long("linked")
                        .action(ArgAction::SetTrue)
                        .help("Mark as fed by an external source rather than manual"),
                ),
        )
        .subcommand(json_flags(Command::new("list").about("List accounts")))
        .subcommand(
            Command::new("set-balance")
                .about("Update an account balance")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .required(true)
                        .allow_negative_numbers(true),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove an account (its transactions are kept)")
                .arg(Arg::new("name").long("name").required(true)),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list income and expenses")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("income|expense"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .help("Positive amount; the sign is implied by the type"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(Arg::new("account").long("account").help("Account name"))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("type").long("type").help("income|expense"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("account").long("account"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(Command::new("categories").about("Show the seeded category suggestions"))
}

fn loan_cmd() -> Command {
    Command::new("loan")
        .about("Track loans, repayment progress, and months remaining")
        .subcommand(
            Command::new("add")
                .about("Add a loan")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("mortgage|auto|student|personal|other"),
                )
                .arg(Arg::new("principal").long("principal").required(true))
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .help("Current balance, defaults to the principal"),
                )
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .default_value("0")
                        .help("Annual interest rate in percent"),
                )
                .arg(Arg::new("payment").long("payment").default_value("0"))
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(Arg::new("end").long("end").required(true).help("YYYY-MM-DD")),
        )
        .subcommand(json_flags(Command::new("list").about("List loans")))
        .subcommand(
            Command::new("set-balance")
                .about("Update a loan's current balance")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("balance").long("balance").required(true)),
        )
        .subcommand(
            Command::new("rm").about("Remove a loan").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Track savings, debt payoff, and investment goals")
        .subcommand(
            Command::new("add")
                .about("Add a goal")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("savings|debt|investment"),
                )
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("current").long("current").default_value("0"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Target date YYYY-MM-DD"),
                ),
        )
        .subcommand(json_flags(Command::new("list").about("List goals with progress")))
        .subcommand(
            Command::new("set-current")
                .about("Update a goal's current amount")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(
            Command::new("rm").about("Remove a goal").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn credit_cmd() -> Command {
    Command::new("credit")
        .about("Record credit score readings over time")
        .subcommand(
            Command::new("add")
                .about("Record a credit score")
                .arg(
                    Arg::new("score")
                        .long("score")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("300-850"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(Arg::new("provider").long("provider").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List score readings, newest first")))
        .subcommand(
            Command::new("rm").about("Delete a score reading").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(Command::new("providers").about("Show the seeded provider suggestions"))
}

fn dashboard_cmd() -> Command {
    json_flags(
        Command::new("dashboard")
            .about("Net worth, current-month cashflow, top categories, and the monthly trend")
            .arg(
                Arg::new("months")
                    .long("months")
                    .default_value("6")
                    .value_parser(value_parser!(usize))
                    .help("How many trailing months in the trend"),
            )
            .arg(
                Arg::new("top")
                    .long("top")
                    .default_value("5")
                    .value_parser(value_parser!(usize))
                    .help("How many top expense categories to show"),
            ),
    )
}

fn advisor_cmd() -> Command {
    Command::new("advisor")
        .about("Quick canned answers to common money questions")
        .subcommand(
            Command::new("ask")
                .about("Ask a single question")
                .arg(Arg::new("text").num_args(1..).required(true)),
        )
        .subcommand(Command::new("chat").about("Interactive prompt; 'quit' to leave"))
}

fn import_cmd() -> Command {
    Command::new("import")
        .about("Import records from CSV")
        .subcommand(
            Command::new("transactions")
                .about("CSV columns: date,type,category,amount,account,description")
                .arg(Arg::new("path").long("path").required(true)),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export records to CSV or JSON")
        .subcommand(
            Command::new("transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}
