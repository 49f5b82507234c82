// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod charts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod expenses;
pub mod logging;
pub mod models;
pub mod taxi;
pub mod utils;
