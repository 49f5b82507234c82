// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense report: load the export, convert the foreign currency, sum by
//! category and draw a pie per side of the ledger.

pub mod aggregate;
pub mod loader;
pub mod normalize;
pub mod pie;
pub mod side_log;

pub use aggregate::{aggregate, Flow, Period};
pub use loader::{load_transactions, read_transactions};
pub use normalize::{normalize, ExchangeRate};
pub use pie::{pie_slices, render_pie, PieSlice};
pub use side_log::{split_foreign, write_side_log, SideSplit};
