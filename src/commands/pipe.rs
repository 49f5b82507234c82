// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::PipeConfig;
use crate::taxi::persist::{write_clean, write_hourly, write_revenue};
use crate::taxi::plots::{render_duration_box, render_hourly, render_top_revenue};
use crate::taxi::{clean, load_sample, mean_by_hour, revenue_by_location, top_locations, StageReport};
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Builds the run configuration from the `taxi-pipe` arguments.
pub fn config_from(m: &clap::ArgMatches) -> Result<PipeConfig> {
    let src = PathBuf::from(m.get_one::<String>("src").unwrap().trim());
    if !src.exists() {
        bail!("Source file {} does not exist", src.display());
    }
    let mut cfg = PipeConfig::new(src);
    if let Some(n) = m.get_one::<usize>("sample") {
        cfg.sample_rows = *n;
    }
    if let Some(p) = m.get_one::<String>("out-dir") {
        cfg.out_dir = PathBuf::from(p.trim());
    }
    if let Some(p) = m.get_one::<String>("plots-dir") {
        cfg.plots_dir = PathBuf::from(p.trim());
    }
    if let Some(p) = m.get_one::<String>("log") {
        cfg.log_path = PathBuf::from(p.trim());
    }
    Ok(cfg)
}

/// Runs the pipeline end to end and returns what cleaning kept and dropped.
pub fn run(cfg: &PipeConfig) -> Result<StageReport> {
    tracing::info!(
        "Start pipeline, file={}, sample={}",
        cfg.src.display(),
        cfg.sample_rows
    );
    let raw = load_sample(&cfg.src, cfg.sample_rows)?;
    tracing::info!("Loaded rows: {}", raw.len());

    let cleaned = clean(raw, &cfg.clean)?;
    for (stage, n) in &cleaned.report.dropped {
        tracing::info!("Dropped {} rows failing '{}'", n, stage);
    }
    let trips = cleaned.trips;

    let clean_path = cfg.clean_path();
    write_clean(&clean_path, &trips)?;
    tracing::info!(
        "Saved clean parquet: {}, rows={}",
        clean_path.display(),
        trips.len()
    );

    let revenue = revenue_by_location(&trips);
    let hourly = mean_by_hour(&trips);
    write_revenue(&cfg.revenue_path(), &revenue)?;
    write_hourly(&cfg.hourly_path(), &hourly)?;
    tracing::info!(
        "Saved aggregates: locations={}, hours={}",
        revenue.len(),
        hourly.len()
    );

    render_top_revenue(
        &cfg.plot("revenue_top10.png"),
        top_locations(&revenue, cfg.top_locations),
    )?;
    render_hourly(&cfg.plot("check_by_hour.png"), &hourly)?;
    let durations: Vec<f64> = trips.iter().map(|t| t.trip_duration_min).collect();
    render_duration_box(
        &cfg.plot("duration_distribution.png"),
        &durations,
        cfg.clean.max_duration_min,
    )?;

    tracing::info!("Pipeline finished OK");
    Ok(cleaned.report)
}
