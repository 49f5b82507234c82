// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Validation and rendering failures raised by the pipeline stages.
///
/// IO, CSV and parquet failures travel as `anyhow::Error` with context
/// attached at the call site; this enum covers the cases the stages decide
/// on themselves.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid exchange rate '{0}': must be greater than zero")]
    InvalidRate(String),

    #[error("Invalid period: --from {from} must be before --to {to}")]
    InvalidPeriod { from: String, to: String },

    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Render error: {0}")]
    Render(String),
}

impl PipelineError {
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Render(err.to_string())
    }
}
