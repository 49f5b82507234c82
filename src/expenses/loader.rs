// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use crate::models::Transaction;
use crate::utils::{parse_amount, parse_date_prefix};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    #[serde(rename = "categoryName", default)]
    category: Option<String>,
    #[serde(default)]
    outcome: String,
    #[serde(rename = "outcomeCurrencyShortTitle", default)]
    outcome_currency: String,
    #[serde(default)]
    income: String,
    #[serde(rename = "incomeCurrencyShortTitle", default)]
    income_currency: String,
}

pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path).with_context(|| format!("Open CSV {}", path.display()))?;
    let rows = read_transactions(file)
        .with_context(|| format!("Read transactions from {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "loaded transactions");
    Ok(rows)
}

/// Reads a `;`-separated export with a header row. Rows without a category
/// are skipped; columns other than the six used here are ignored.
pub fn read_transactions<R: Read>(input: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);
    let headers = rdr.headers()?.clone();

    let mut out = Vec::new();
    let mut rec = StringRecord::new();
    while rdr.read_record(&mut rec)? {
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        let mut raw: RawRow = rec.deserialize(Some(&headers)).map_err(|e| {
            PipelineError::MalformedRow {
                line,
                reason: e.to_string(),
            }
        })?;
        let Some(category) = raw.category.take().filter(|c| !c.is_empty()) else {
            continue;
        };
        let tx = raw
            .into_transaction(category)
            .map_err(|e| PipelineError::MalformedRow {
                line,
                reason: format!("{:#}", e),
            })?;
        out.push(tx);
    }
    Ok(out)
}

impl RawRow {
    fn into_transaction(self, category: String) -> Result<Transaction> {
        Ok(Transaction {
            date: parse_date_prefix(&self.date)?,
            category,
            outcome: parse_amount(&self.outcome)?,
            outcome_currency: self.outcome_currency,
            income: parse_amount(&self.income)?,
            income_currency: self.income_currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const EXPORT: &str = "date;categoryName;payee;outcome;outcomeCurrencyShortTitle;income;incomeCurrencyShortTitle
2024-01-05;food;Biedronka;100;PLN;0;PLN
2024-01-06;;Transfer;20;PLN;0;PLN
2024-01-07 10:00:00;salary;;0;PLN;5000.50;PLN
";

    #[test]
    fn skips_rows_without_category() {
        let rows = read_transactions(EXPORT.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "food");
        assert_eq!(rows[1].category, "salary");
        assert_eq!(rows[1].income, Decimal::new(500050, 2));
        assert_eq!(rows[1].date.to_string(), "2024-01-07");
    }

    #[test]
    fn malformed_amount_names_the_line() {
        let bad = "date;categoryName;outcome;outcomeCurrencyShortTitle;income;incomeCurrencyShortTitle
2024-01-05;food;abc;PLN;0;PLN
";
        let err = read_transactions(bad.as_bytes()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("row 2"), "{}", msg);
        assert!(msg.contains("abc"), "{}", msg);
    }
}
