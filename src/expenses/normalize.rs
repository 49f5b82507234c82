// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Currencies;
use crate::error::PipelineError;
use crate::models::Transaction;
use rust_decimal::Decimal;

/// Foreign units per one local unit. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    pub fn new(rate: Decimal) -> Result<Self, PipelineError> {
        if rate <= Decimal::ZERO {
            return Err(PipelineError::InvalidRate(rate.to_string()));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Foreign amount expressed in local units, rounded to cents.
    pub fn to_local(&self, amount: Decimal) -> Decimal {
        (amount / self.0).round_dp(2)
    }
}

/// Converts every foreign-currency outcome or income into the local
/// currency. The input is left as is.
pub fn normalize(rows: &[Transaction], rate: ExchangeRate, ccy: &Currencies) -> Vec<Transaction> {
    rows.iter()
        .map(|tx| {
            let mut tx = tx.clone();
            if tx.outcome_currency == ccy.foreign {
                tx.outcome = rate.to_local(tx.outcome);
                tx.outcome_currency = ccy.local.clone();
            }
            if tx.income_currency == ccy.foreign {
                tx.income = rate.to_local(tx.income);
                tx.income_currency = ccy.local.clone();
            }
            tx
        })
        .collect()
}
