// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::menu::{MENU, render};
use crate::utils::maybe_print_json;

/// Needs no backend, so it takes no context.
pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &*MENU)? {
        print!("{}", render(&MENU));
    }
    Ok(())
}
