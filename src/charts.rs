// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};
use std::path::Path;

pub const FONT: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static REGISTERED: OnceCell<()> = OnceCell::new();

/// Registers the bundled font under [`FONT`] once per process. Every
/// renderer calls this before it draws any text.
pub fn ensure_font() -> Result<(), PipelineError> {
    REGISTERED
        .get_or_try_init(|| {
            register_font(FONT, FontStyle::Normal, DEJAVU_SANS)
                .map_err(|_| PipelineError::Render("bundled font could not be parsed".into()))
        })
        .map(|_| ())
}

pub fn prepare_output(path: &Path) -> anyhow::Result<()> {
    ensure_font()?;
    crate::utils::ensure_parent(path)
}
