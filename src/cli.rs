// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn search_arg() -> Arg {
    Arg::new("search")
        .long("search")
        .short('s')
        .help("Case-insensitive text filter over the listed records")
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

fn client_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .required(required)
            .value_parser(value_parser!(i64))
            .help("Client type id (see `catalog client-types`)"),
    )
    .arg(Arg::new("name").long("name").required(required))
    .arg(
        Arg::new("identity")
            .long("identity")
            .required(required)
            .help("National ID"),
    )
    .arg(
        Arg::new("birth-date")
            .long("birth-date")
            .help("YYYY-MM-DD; defaults to today on create"),
    )
    .arg(Arg::new("phone").long("phone").required(required))
    .arg(Arg::new("email").long("email").required(required))
}

fn quote_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("client")
            .long("client")
            .required(required)
            .value_parser(value_parser!(i64))
            .help("Client id"),
    )
    .arg(
        Arg::new("insurance-type")
            .long("insurance-type")
            .required(required)
            .value_parser(value_parser!(i64))
            .help("Insurance type id (see `catalog insurance-types`)"),
    )
    .arg(
        Arg::new("currency")
            .long("currency")
            .required(required)
            .value_parser(value_parser!(i64))
            .help("Currency id (see `catalog currencies`)"),
    )
    .arg(
        Arg::new("description")
            .long("description")
            .required(required)
            .help("Insured asset description (10+ characters)"),
    )
    .arg(
        Arg::new("sum-insured")
            .long("sum-insured")
            .required(required)
            .help("Insured sum, at least 1"),
    )
}

pub fn build_cli() -> Command {
    Command::new("cotiza")
        .about("Insurance clients, quotes, and quote reports")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Backend base URL (overrides COTIZA_API_URL)"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .global(true)
                .help("Backend API key (overrides COTIZA_API_KEY)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log requests to stderr"),
        )
        .subcommand(
            Command::new("catalog")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .about("Reference lists used by the forms")
                .subcommand(output_flags(Command::new("insurance-types")))
                .subcommand(output_flags(Command::new("client-types")))
                .subcommand(output_flags(Command::new("currencies"))),
        )
        .subcommand(
            Command::new("client")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .about("Manage clients")
                .subcommand(output_flags(Command::new("list").arg(search_arg())))
                .subcommand(client_fields(
                    Command::new("add").about("Create a client"),
                    true,
                ))
                .subcommand(client_fields(
                    Command::new("edit")
                        .about("Update a client; omitted fields keep their value")
                        .arg(id_arg("Client id")),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a client")
                        .arg(id_arg("Client id"))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("quote")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .about("Manage quotes")
                .subcommand(output_flags(Command::new("list").arg(search_arg())))
                .subcommand(quote_fields(
                    Command::new("add").about("Create a quote"),
                    true,
                ))
                .subcommand(quote_fields(
                    Command::new("edit")
                        .about("Update a quote; omitted fields keep their value")
                        .arg(id_arg("Quote id")),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a quote")
                        .arg(id_arg("Quote id"))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(output_flags(
            Command::new("report")
                .about("Quote report with totals and spreadsheet export")
                .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD"))
                .arg(
                    Arg::new("insurance-type")
                        .long("insurance-type")
                        .value_parser(value_parser!(i64))
                        .help("Only this insurance type id"),
                )
                .arg(
                    Arg::new("export")
                        .long("export")
                        .action(ArgAction::SetTrue)
                        .help("Write the loaded quotes to a file"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("xlsx")
                        .help("xlsx|csv|json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Output path (default: download dir, dated file name)"),
                ),
        ))
        .subcommand(output_flags(
            Command::new("menu").about("Show the navigation menu"),
        ))
}
