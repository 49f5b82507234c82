// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use flatreports::{cli, commands, logging};

fn main() -> Result<()> {
    logging::init_console();
    let cli = cli::build_expenses_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("report", _)) => commands::report::handle(&matches)?,
        _ => {
            cli::build_expenses_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
