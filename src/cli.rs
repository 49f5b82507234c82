// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print the summary as pretty JSON")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print the summary as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

pub fn build_expenses_cli() -> Command {
    let report = Command::new("report")
        .about("Aggregate expenses and income by category and draw pie charts")
        .arg(
            Arg::new("from")
                .long("from")
                .required(true)
                .value_name("DATE")
                .help("Start date (inclusive), YYYY-MM-DD"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .required(true)
                .value_name("DATE")
                .help("End date (exclusive), YYYY-MM-DD"),
        )
        .arg(
            Arg::new("uah-rate")
                .long("uah-rate")
                .required(true)
                .value_name("RATE")
                .allow_hyphen_values(true)
                .help("UAH per 1 PLN, e.g. 11.53"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .value_name("PATH")
                .help("Semicolon-separated export [default: data/transactions.csv]"),
        )
        .arg(
            Arg::new("logs-dir")
                .long("logs-dir")
                .value_name("DIR")
                .help("Where non-PLN leftovers are logged [default: logs]"),
        )
        .arg(
            Arg::new("plots-dir")
                .long("plots-dir")
                .value_name("DIR")
                .help("Where charts are written [default: plots]"),
        );

    Command::new("expenses")
        .version(clap::crate_version!())
        .about("Expense and income report from a transactions export")
        .arg_required_else_help(true)
        .subcommand(json_flags(report))
}

pub fn build_taxi_cli() -> Command {
    Command::new("taxi-pipe")
        .version(clap::crate_version!())
        .about("Clean a NYC taxi sample, aggregate revenue and plot diagnostics")
        .arg(
            Arg::new("src")
                .long("src")
                .required(true)
                .value_name("PATH")
                .help("Path to raw CSV file"),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("100000")
                .help("Number of rows to load"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .value_name("DIR")
                .help("Parquet output directory [default: data/processed]"),
        )
        .arg(
            Arg::new("plots-dir")
                .long("plots-dir")
                .value_name("DIR")
                .help("Plot output directory [default: plots]"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("PATH")
                .help("Pipeline log file [default: logs/pipe.log]"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clis_are_well_formed() {
        build_expenses_cli().debug_assert();
        build_taxi_cli().debug_assert();
    }

    #[test]
    fn sample_defaults_to_hundred_thousand() {
        let m = build_taxi_cli().get_matches_from(["taxi-pipe", "--src", "raw.csv"]);
        assert_eq!(m.get_one::<usize>("sample"), Some(&100_000));
    }

    #[test]
    fn report_requires_rate() {
        let res = build_expenses_cli().try_get_matches_from([
            "expenses", "report", "--from", "2024-01-01", "--to", "2024-02-01",
        ]);
        assert!(res.is_err());
    }
}
