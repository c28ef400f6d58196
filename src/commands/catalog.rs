// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{Context, load_catalog};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("insurance-types", sub)) => {
            let items = load_catalog(ctx, ctx.api.catalog().insurance_types(), "insurance types")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let rows = items
                    .iter()
                    .map(|t| vec![t.id.to_string(), t.name.clone(), t.description.clone()])
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Description"], rows));
            }
        }
        Some(("client-types", sub)) => {
            let items = load_catalog(ctx, ctx.api.catalog().client_types(), "client types")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let rows = items
                    .iter()
                    .map(|t| vec![t.id.to_string(), t.name.clone()])
                    .collect();
                println!("{}", pretty_table(&["Id", "Name"], rows));
            }
        }
        Some(("currencies", sub)) => {
            let items = load_catalog(ctx, ctx.api.catalog().currencies(), "currencies")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let rows = items
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.code.clone(),
                            c.name.clone(),
                            c.symbol.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Code", "Name", "Symbol"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
