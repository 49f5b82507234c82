// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Yellow-cab sample ETL.

pub mod aggregate;
pub mod clean;
pub mod loader;
pub mod persist;
pub mod plots;

pub use aggregate::{mean_by_hour, revenue_by_location, top_locations};
pub use clean::{clean, CleanOutcome, Stage, StageReport, CLEAN_COLUMN_ORDER};
pub use loader::{load_sample, read_sample, RawTrip};
