// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ReportConfig;
use crate::expenses::{
    aggregate, load_transactions, normalize, render_pie, split_foreign, write_side_log,
    ExchangeRate, Flow, Period, SideSplit,
};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(sub),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize)]
struct SummaryRow {
    flow: Flow,
    category: String,
    amount: Decimal,
}

/// Everything a report run produced, for printing or inspection.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub outcome: SideSplit,
    pub income: SideSplit,
    pub charts: Vec<PathBuf>,
}

fn report(sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("uah-rate").unwrap().trim())?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut cfg = ReportConfig::default();
    if let Some(p) = sub.get_one::<String>("data") {
        cfg.input = PathBuf::from(p.trim());
    }
    if let Some(p) = sub.get_one::<String>("logs-dir") {
        cfg.logs_dir = PathBuf::from(p.trim());
    }
    if let Some(p) = sub.get_one::<String>("plots-dir") {
        cfg.plots_dir = PathBuf::from(p.trim());
    }

    let period = Period::new(from, to)?;
    let rate = ExchangeRate::new(rate)?;
    let out = run(&cfg, period, rate)?;

    let mut rows = Vec::new();
    for (flow, split) in [(Flow::Outcome, &out.outcome), (Flow::Income, &out.income)] {
        for t in &split.kept {
            rows.push(SummaryRow {
                flow,
                category: t.category.clone(),
                amount: t.amount,
            });
        }
    }
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let local = &cfg.currencies.local;
        println!(
            "{}",
            pretty_table(
                &["Category", &format!("Spent ({})", local), "Share"],
                table_rows(&out.outcome)
            )
        );
        println!(
            "{}",
            pretty_table(
                &["Category", &format!("Earned ({})", local), "Share"],
                table_rows(&out.income)
            )
        );
    }
    Ok(())
}

fn table_rows(split: &SideSplit) -> Vec<Vec<String>> {
    let total: Decimal = split.kept.iter().map(|t| t.amount).sum();
    split
        .kept
        .iter()
        .map(|t| {
            let share = if total.is_zero() {
                0.0
            } else {
                (t.amount / total * Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or_default()
            };
            vec![t.category.clone(), fmt_money(&t.amount), format!("{:.1}%", share)]
        })
        .collect()
}

/// Runs the whole report: load, convert, aggregate, log leftovers and draw
/// both charts.
pub fn run(cfg: &ReportConfig, period: Period, rate: ExchangeRate) -> Result<ReportOutput> {
    tracing::info!(
        input = %cfg.input.display(),
        rate = %rate.value(),
        "starting expense report"
    );
    let rows = load_transactions(&cfg.input)?;
    let rows = normalize(&rows, rate, &cfg.currencies);

    let local = cfg.currencies.local.as_str();
    let outcome = split_foreign(&aggregate(&rows, period, Flow::Outcome), local);
    let income = split_foreign(&aggregate(&rows, period, Flow::Income), local);

    write_side_log(&cfg.outcome_log(), &outcome.foreign)?;
    write_side_log(&cfg.income_log(), &income.foreign)?;

    let mut charts = Vec::new();
    let expenses_png = cfg.expenses_chart();
    if render_pie(&expenses_png, "Expenses", &outcome.kept, &cfg.pie)? {
        charts.push(expenses_png);
    }
    let income_png = cfg.income_chart();
    if render_pie(&income_png, "Income", &income.kept, &cfg.pie)? {
        charts.push(income_png);
    }

    tracing::info!(
        outcome_groups = outcome.kept.len(),
        income_groups = income.kept.len(),
        "expense report finished"
    );
    Ok(ReportOutput {
        outcome,
        income,
        charts,
    })
}
