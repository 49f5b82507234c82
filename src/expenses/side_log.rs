// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategorySummary, CategoryTotal};
use crate::utils::{ensure_parent, fmt_money};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Result of separating local-currency totals from leftovers in any other
/// currency.
#[derive(Debug, Clone, PartialEq)]
pub struct SideSplit {
    /// Local-currency totals, largest first.
    pub kept: Vec<CategoryTotal>,
    /// Groups in any other currency, in input order.
    pub foreign: Vec<CategorySummary>,
}

pub fn split_foreign(summaries: &[CategorySummary], local: &str) -> SideSplit {
    let (local_rows, foreign): (Vec<_>, Vec<_>) = summaries
        .iter()
        .cloned()
        .partition(|s| s.currency == local);

    let mut kept: Vec<CategoryTotal> = local_rows
        .into_iter()
        .map(|s| CategoryTotal {
            category: s.category,
            amount: s.amount,
        })
        .collect();
    kept.sort_by(|a, b| b.amount.cmp(&a.amount));

    SideSplit { kept, foreign }
}

/// Writes one `category | currency | amount` line per row, replacing any
/// previous file.
pub fn write_side_log(path: &Path, rows: &[CategorySummary]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("Create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    for r in rows {
        writeln!(w, "{} | {} | {}", r.category, r.currency, fmt_money(&r.amount))?;
    }
    w.flush()?;
    if !rows.is_empty() {
        tracing::warn!(
            path = %path.display(),
            rows = rows.len(),
            "rows left in a non-local currency"
        );
    }
    Ok(())
}
