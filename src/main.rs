// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cotiza::api::{ApiClient, HttpTransport};
use cotiza::commands::{self, Context, Reported};
use cotiza::config::{Config, Overrides};
use cotiza::cli;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    // The menu is static and needs no backend.
    if let Some(("menu", sub)) = matches.subcommand() {
        return commands::menu::handle(sub);
    }
    if matches.subcommand().is_none() {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }

    let config = Config::load(Overrides {
        api_url: matches.get_one::<String>("api-url").map(String::as_str),
        api_key: matches.get_one::<String>("api-key").map(String::as_str),
    })?;
    tracing::debug!(api_url = %config.api_url, "configuration loaded");
    let ctx = Context::terminal(ApiClient::new(HttpTransport::new(&config)?));

    match matches.subcommand() {
        Some(("catalog", sub)) => commands::catalog::handle(&ctx, sub)?,
        Some(("client", sub)) => commands::clients::handle(&ctx, sub)?,
        Some(("quote", sub)) => commands::quotes::handle(&ctx, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<Reported>() => {
            tracing::debug!(error = %err, "command failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
