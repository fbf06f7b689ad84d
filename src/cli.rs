// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn source_args() -> [Arg; 2] {
    [
        Arg::new("source")
            .long("source")
            .value_parser(["local", "api", "file"])
            .default_value("local")
            .help("Where to read transactions from"),
        Arg::new("file")
            .long("file")
            .required_if_eq("source", "file")
            .help("JSON file of transactions (with --source file)"),
    ]
}

fn tx_fields(required: bool) -> Vec<Arg> {
    vec![
        Arg::new("date").long("date").required(required).help("YYYY-MM-DD"),
        Arg::new("type")
            .long("type")
            .required(required)
            .value_parser(["income", "expense"]),
        Arg::new("amount").long("amount").required(required),
        Arg::new("category").long("category"),
        Arg::new("title").long("title"),
        Arg::new("description").long("description"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("budgetwise")
        .version(clap::crate_version!())
        .about("Income, expenses, reserved savings and goals")
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Reference date YYYY-MM-DD (defaults to the local date)"),
        )
        .arg(
            Arg::new("matured-reserve")
                .long("matured-reserve")
                .global(true)
                .value_parser(["outflow", "income"])
                .help("How matured reserved income is counted (overrides the setting)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("tx")
                .about("Manage local transactions")
                .subcommand(
                    Command::new("add")
                        .args(tx_fields(true))
                        .arg(
                            Arg::new("reserved")
                                .long("reserved")
                                .action(ArgAction::SetTrue)
                                .help("Income set aside until its date"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .args(tx_fields(false))
                        .arg(
                            Arg::new("reserved")
                                .long("reserved")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated figures")
                .subcommand(
                    Command::new("summary")
                        .args(json_args())
                        .args(source_args()),
                )
                .subcommand(
                    Command::new("categories")
                        .args(json_args())
                        .args(source_args()),
                )
                .subcommand(
                    Command::new("month")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("YYYY-MM (defaults to the reference month)"),
                        )
                        .args(json_args())
                        .args(source_args()),
                )
                .subcommand(
                    Command::new("year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Defaults to the reference year"),
                        )
                        .args(json_args())
                        .args(source_args()),
                ),
        )
        .subcommand(
            Command::new("advisor").about("Ask about your figures").subcommand(
                Command::new("ask")
                    .arg(Arg::new("text").num_args(0..).trailing_var_arg(true))
                    .args(source_args()),
            ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("target").long("target"))
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("save")
                        .about("Set the amount saved so far")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(Command::new("clear").about("Remove every goal of the current user")),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions")
                    .arg(Arg::new("path").required(true))
                    .arg(
                        Arg::new("replace")
                            .long("replace")
                            .action(ArgAction::SetTrue)
                            .help("Drop existing transactions first"),
                    ),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("sync").about("Replace local transactions with the API's"))
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(Command::new("doctor").about("Report data-quality problems"))
}
