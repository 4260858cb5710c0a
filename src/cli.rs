// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const RANGES: [&str; 6] = ["today", "week", "month", "quarter", "year", "all"];

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn range_arg() -> Arg {
    Arg::new("range")
        .long("range")
        .default_value("month")
        .value_parser(RANGES)
        .help("Date window ending now")
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .required(required)
        .value_parser(["income", "expense"])
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(kind_arg(required))
        .arg(Arg::new("amount").long("amount").required(required))
        .arg(Arg::new("category").long("category").required(required))
        .arg(Arg::new("description").long("description"))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
        .arg(Arg::new("receipt").long("receipt").help("Receipt URL"))
        .arg(
            Arg::new("recurring")
                .long("recurring")
                .value_parser(["weekly", "monthly", "yearly", "none"]),
        )
}

fn goal_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required))
        .arg(Arg::new("target").long("target").required(required))
        .arg(Arg::new("current").long("current"))
        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
        .arg(Arg::new("color").long("color"))
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Personal budget tracking: transactions, budgets, savings goals, insights")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_fields(Command::new("add"), true))
                .subcommand(tx_fields(
                    Command::new("edit").arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("category").long("category").default_value("all"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("all")
                                .value_parser(["all", "income", "expense"]),
                        )
                        .arg(range_arg())
                        .arg(Arg::new("search").long("search").default_value(""))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(
                    Command::new("restore")
                        .about("Re-add a removed transaction from its JSON record")
                        .arg(Arg::new("record").long("record").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly limits and utilization")
                .subcommand(
                    Command::new("set-limit").arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("set")
                        .about("Set a category limit (0 clears it)")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("status").arg(range_arg()))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, category breakdowns and monthly trends")
                .subcommand(json_flags(Command::new("summary").arg(range_arg())))
                .subcommand(json_flags(Command::new("categories").arg(range_arg())))
                .subcommand(json_flags(Command::new("monthly"))),
        )
        .subcommand(json_flags(
            Command::new("insights").about("Spending observations for this month").arg(
                Arg::new("all")
                    .long("all")
                    .action(ArgAction::SetTrue)
                    .help("Show every insight instead of the top five"),
            ),
        ))
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(goal_fields(Command::new("add"), true))
                .subcommand(goal_fields(
                    Command::new("edit").arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("contribute")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("withdraw")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("category")
                .about("Built-in and custom categories")
                .subcommand(
                    Command::new("add")
                        .arg(kind_arg(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("budget").long("budget")),
                )
                .subcommand(Command::new("list").arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .value_parser(["income", "expense"]),
                ))
                .subcommand(
                    Command::new("rm")
                        .arg(kind_arg(true))
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Currency and report preferences")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("currency").arg(Arg::new("code").long("code").required(true)),
                )
                .subcommand(
                    Command::new("email")
                        .arg(Arg::new("address").long("address"))
                        .arg(
                            Arg::new("off")
                                .long("off")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("address"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write all transactions as CSV")
                .arg(Arg::new("out").long("out").help("Defaults to budget-export-<date>.csv")),
        )
        .subcommand(
            Command::new("import")
                .about("Read transactions from a CSV export")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all transactions and goals and restore default budgets")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the reset"),
                ),
        )
}
