// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use flatreports::{cli, commands, logging};

fn main() -> Result<()> {
    let matches = cli::build_taxi_cli().get_matches();
    let cfg = commands::pipe::config_from(&matches)?;
    let _guard = logging::init_file(&cfg.log_path)?;
    if let Err(e) = commands::pipe::run(&cfg) {
        tracing::error!("Pipeline failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
