// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `YYYY-MM-DD` as well as a date followed by a time part.
pub fn parse_date_prefix(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    parse_date(head)
}

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    // NYC Open Data exports
    "%m/%d/%Y %I:%M:%S %p",
];

pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .with_context(|| format!("Invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS or MM/DD/YYYY HH:MM:SS AM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Like [`parse_decimal`] but an empty cell reads as zero.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(s)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_prefix_ignores_time_part() {
        let d = parse_date_prefix("2024-01-05 13:45:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert!(parse_date_prefix("05.01.2024").is_err());
    }

    #[test]
    fn empty_amount_is_zero() {
        assert_eq!(parse_amount("  ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("12.50").unwrap(), Decimal::new(1250, 2));
        assert!(parse_amount("12,50").is_err());
    }

    #[test]
    fn datetime_accepts_both_separators() {
        let a = parse_datetime("2019-03-01 08:15:00").unwrap();
        let b = parse_datetime("2019-03-01T08:15:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn datetime_accepts_open_data_export_form() {
        let a = parse_datetime("01/01/2019 12:46:40 AM").unwrap();
        assert_eq!(a, parse_datetime("2019-01-01 00:46:40").unwrap());
        let b = parse_datetime("01/01/2019 01:18:59 PM").unwrap();
        assert_eq!(b, parse_datetime("2019-01-01 13:18:59").unwrap());
        assert!(parse_datetime("2019/01/01 00:46").is_err());
    }
}
