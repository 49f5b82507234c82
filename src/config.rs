// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use std::path::PathBuf;

/// Settings for the `expenses report` run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Semicolon-separated export. Default `data/transactions.csv`.
    pub input: PathBuf,
    /// Directory for the non-local currency text logs. Default `logs`.
    pub logs_dir: PathBuf,
    /// Directory for the pie charts. Default `plots`.
    pub plots_dir: PathBuf,
    pub currencies: Currencies,
    pub pie: PieConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/transactions.csv"),
            logs_dir: PathBuf::from("logs"),
            plots_dir: PathBuf::from("plots"),
            currencies: Currencies::default(),
            pie: PieConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn outcome_log(&self) -> PathBuf {
        self.logs_dir
            .join(format!("non_{}_outcome.txt", self.currencies.local.to_lowercase()))
    }

    pub fn income_log(&self) -> PathBuf {
        self.logs_dir
            .join(format!("non_{}_income.txt", self.currencies.local.to_lowercase()))
    }

    pub fn expenses_chart(&self) -> PathBuf {
        self.plots_dir.join("expenses.png")
    }

    pub fn income_chart(&self) -> PathBuf {
        self.plots_dir.join("income.png")
    }
}

/// Local currency and the one foreign currency converted into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currencies {
    pub local: String,
    pub foreign: String,
}

impl Default for Currencies {
    fn default() -> Self {
        Self {
            local: "PLN".to_string(),
            foreign: "UAH".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PieConfig {
    /// Wedges below this share (percent) get no in-wedge label. Default 1.0.
    pub min_label_pct: f64,
    /// Image size in pixels. Default 1600x900.
    pub size: (u32, u32),
    pub legend_title: String,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            min_label_pct: 1.0,
            size: (1600, 900),
            legend_title: "Categories".to_string(),
        }
    }
}

/// Settings for one `taxi-pipe` run.
#[derive(Debug, Clone)]
pub struct PipeConfig {
    pub src: PathBuf,
    /// Rows read from the head of `src`. Default 100000.
    pub sample_rows: usize,
    /// Parquet output directory. Default `data/processed`.
    pub out_dir: PathBuf,
    /// Default `plots`.
    pub plots_dir: PathBuf,
    /// Default `logs/pipe.log`.
    pub log_path: PathBuf,
    /// Bars in the revenue chart. Default 10.
    pub top_locations: usize,
    pub clean: CleanConfig,
}

pub const DEFAULT_SAMPLE_ROWS: usize = 100_000;

impl PipeConfig {
    pub fn new(src: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            sample_rows: DEFAULT_SAMPLE_ROWS,
            out_dir: PathBuf::from("data/processed"),
            plots_dir: PathBuf::from("plots"),
            log_path: PathBuf::from("logs/pipe.log"),
            top_locations: 10,
            clean: CleanConfig::default(),
        }
    }

    pub fn clean_path(&self) -> PathBuf {
        self.out_dir.join("taxi_clean.parquet")
    }

    pub fn revenue_path(&self) -> PathBuf {
        self.out_dir.join("revenue_by_loc.parquet")
    }

    pub fn hourly_path(&self) -> PathBuf {
        self.out_dir.join("check_by_hour.parquet")
    }

    pub fn plot(&self, name: &str) -> PathBuf {
        self.plots_dir.join(name)
    }
}

/// Thresholds applied by the taxi cleaning stages.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Trips picked up before this date are dropped. Default 2019-01-01.
    pub pickup_cutoff: NaiveDate,
    /// Trips lasting this long or longer (minutes) are dropped. Default 186.
    pub max_duration_min: f64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            pickup_cutoff: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            max_duration_min: 186.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_paths_follow_local_currency() {
        let cfg = ReportConfig::default();
        assert_eq!(cfg.outcome_log(), PathBuf::from("logs/non_pln_outcome.txt"));
        assert_eq!(cfg.income_log(), PathBuf::from("logs/non_pln_income.txt"));
        assert_eq!(cfg.expenses_chart(), PathBuf::from("plots/expenses.png"));
    }

    #[test]
    fn pipe_defaults() {
        let cfg = PipeConfig::new("raw.csv");
        assert_eq!(cfg.sample_rows, 100_000);
        assert_eq!(
            cfg.clean_path(),
            PathBuf::from("data/processed/taxi_clean.parquet")
        );
        assert_eq!(cfg.clean.max_duration_min, 186.0);
        assert_eq!(cfg.clean.pickup_cutoff.to_string(), "2019-01-01");
    }
}
