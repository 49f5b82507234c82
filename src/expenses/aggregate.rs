// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use crate::models::{CategorySummary, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Half-open date range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    from: NaiveDate,
    to: NaiveDate,
}

impl Period {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, PipelineError> {
        if from >= to {
            return Err(PipelineError::InvalidPeriod {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Outcome,
    Income,
}

impl Flow {
    pub fn label(&self) -> &'static str {
        match self {
            Flow::Outcome => "outcome",
            Flow::Income => "income",
        }
    }

    /// Outcome rows carry no income and income rows carry no outcome.
    fn selects(&self, tx: &Transaction) -> bool {
        match self {
            Flow::Outcome => tx.income.is_zero(),
            Flow::Income => tx.outcome.is_zero(),
        }
    }

    fn amount<'a>(&self, tx: &'a Transaction) -> (Decimal, &'a str) {
        match self {
            Flow::Outcome => (tx.outcome, tx.outcome_currency.as_str()),
            Flow::Income => (tx.income, tx.income_currency.as_str()),
        }
    }
}

/// Sums one side of the ledger by (category, currency) within `period`.
/// Groups keep the order in which they first appear.
pub fn aggregate(rows: &[Transaction], period: Period, flow: Flow) -> Vec<CategorySummary> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut out: Vec<CategorySummary> = Vec::new();
    for tx in rows
        .iter()
        .filter(|tx| period.contains(tx.date) && flow.selects(tx))
    {
        let (amount, ccy) = flow.amount(tx);
        let key = (tx.category.clone(), ccy.to_string());
        match index.get(&key) {
            Some(&i) => out[i].amount += amount,
            None => {
                index.insert(key, out.len());
                out.push(CategorySummary {
                    category: tx.category.clone(),
                    currency: ccy.to_string(),
                    amount,
                });
            }
        }
    }
    tracing::debug!(flow = flow.label(), groups = out.len(), "aggregated");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn period_is_half_open() {
        let p = Period::new(d("2024-01-01"), d("2024-02-01")).unwrap();
        assert!(p.contains(d("2024-01-01")));
        assert!(p.contains(d("2024-01-31")));
        assert!(!p.contains(d("2024-02-01")));
        assert!(!p.contains(d("2023-12-31")));
    }

    #[test]
    fn empty_or_inverted_period_is_rejected() {
        assert!(Period::new(d("2024-02-01"), d("2024-02-01")).is_err());
        assert!(Period::new(d("2024-02-01"), d("2024-01-01")).is_err());
    }
}
