// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::{prepare_output, FONT};
use crate::config::PieConfig;
use crate::error::PipelineError;
use crate::models::CategoryTotal;
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rust_decimal::prelude::ToPrimitive;
use std::f64::consts::PI;
use std::path::Path;

const START_DEG: f64 = 90.0;
const LABEL_RADIUS: f64 = 0.77;

/// One wedge of the pie, angles in degrees counter-clockwise from 3 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub category: String,
    pub value: f64,
    pub share_pct: f64,
    pub legend: String,
    /// `None` when the share is under the label threshold.
    pub wedge_label: Option<String>,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// Lays out the wedges for `totals`. Non-positive amounts cannot be drawn
/// as wedges and are left out; an empty result means there is nothing to
/// draw.
pub fn pie_slices(totals: &[CategoryTotal], min_label_pct: f64) -> Vec<PieSlice> {
    let values: Vec<(&str, f64)> = totals
        .iter()
        .filter_map(|t| t.amount.to_f64().map(|v| (t.category.as_str(), v)))
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = values.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = START_DEG;
    values
        .into_iter()
        .map(|(name, v)| {
            let share = v / total * 100.0;
            let sweep = share / 100.0 * 360.0;
            let slice = PieSlice {
                category: name.to_string(),
                value: v,
                share_pct: share,
                legend: format!("{}: {:.2} ({:.1}%)", name, v, share),
                wedge_label: (share >= min_label_pct).then(|| format!("{:.1}%", share)),
                start_deg: angle,
                end_deg: angle + sweep,
            };
            angle += sweep;
            slice
        })
        .collect()
}

fn point_at(center: (i32, i32), radius: f64, deg: f64) -> (i32, i32) {
    let rad = deg * PI / 180.0;
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

fn wedge(center: (i32, i32), radius: f64, s: &PieSlice) -> Vec<(i32, i32)> {
    let steps = ((s.end_deg - s.start_deg).abs().ceil() as usize).max(1);
    let mut pts = Vec::with_capacity(steps + 2);
    pts.push(center);
    for i in 0..=steps {
        let deg = s.start_deg + (s.end_deg - s.start_deg) * i as f64 / steps as f64;
        pts.push(point_at(center, radius, deg));
    }
    pts
}

/// Draws `totals` as a pie with a legend on the right. Returns `false`
/// without touching `path` when there is nothing to draw.
pub fn render_pie(path: &Path, title: &str, totals: &[CategoryTotal], cfg: &PieConfig) -> Result<bool> {
    let slices = pie_slices(totals, cfg.min_label_pct);
    if slices.is_empty() {
        tracing::warn!(chart = %path.display(), "no positive amounts, chart skipped");
        return Ok(false);
    }
    prepare_output(path)?;

    let (w, h) = cfg.size;
    let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
    root.fill(&WHITE).map_err(PipelineError::render)?;
    let root = root
        .titled(title, (FONT, 36))
        .map_err(PipelineError::render)?;
    let (pie_area, legend_area) = root.split_horizontally((w as i32) / 2);

    let (pw, ph) = pie_area.dim_in_pixel();
    let center = (pw as i32 / 2, ph as i32 / 2);
    let radius = f64::from(pw.min(ph)) * 0.45;
    let label_style = TextStyle::from((FONT, 20).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (i, s) in slices.iter().enumerate() {
        let pts = wedge(center, radius, s);
        pie_area
            .draw(&Polygon::new(pts.clone(), Palette99::pick(i).filled()))
            .map_err(PipelineError::render)?;
        let mut outline = pts;
        outline.push(center);
        pie_area
            .draw(&PathElement::new(outline, WHITE.stroke_width(2)))
            .map_err(PipelineError::render)?;
    }
    for s in &slices {
        if let Some(label) = &s.wedge_label {
            let at = point_at(center, radius * LABEL_RADIUS, (s.start_deg + s.end_deg) / 2.0);
            pie_area
                .draw(&Text::new(label.clone(), at, label_style.clone()))
                .map_err(PipelineError::render)?;
        }
    }

    let (_, lh) = legend_area.dim_in_pixel();
    let row = 28;
    let top = (lh as i32 - row * (slices.len() as i32 + 1)).max(0) / 2;
    legend_area
        .draw(&Text::new(cfg.legend_title.clone(), (10, top), (FONT, 24).into_font()))
        .map_err(PipelineError::render)?;
    for (i, s) in slices.iter().enumerate() {
        let y = top + row * (i as i32 + 1) + 6;
        legend_area
            .draw(&Rectangle::new([(10, y), (28, y + 18)], Palette99::pick(i).filled()))
            .map_err(PipelineError::render)?;
        legend_area
            .draw(&Text::new(s.legend.clone(), (36, y), (FONT, 20).into_font()))
            .map_err(PipelineError::render)?;
    }

    root.present().map_err(PipelineError::render)?;
    tracing::info!(chart = %path.display(), slices = slices.len(), "pie chart written");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn total(cat: &str, cents: i64) -> CategoryTotal {
        CategoryTotal {
            category: cat.to_string(),
            amount: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn legend_shows_value_and_share() {
        let slices = pie_slices(&[total("rent", 7500), total("food", 2500)], 1.0);
        assert_eq!(slices[0].legend, "rent: 75.00 (75.0%)");
        assert_eq!(slices[1].legend, "food: 25.00 (25.0%)");
        assert_eq!(slices[0].wedge_label.as_deref(), Some("75.0%"));
    }

    #[test]
    fn small_wedges_have_no_label() {
        let slices = pie_slices(&[total("rent", 99950), total("gum", 50)], 1.0);
        assert!(slices[0].wedge_label.is_some());
        assert_eq!(slices[1].wedge_label, None);
        assert!(slices[1].legend.starts_with("gum: 0.50"));
    }

    #[test]
    fn wedges_cover_full_circle_from_twelve_o_clock() {
        let slices = pie_slices(&[total("a", 100), total("b", 200), total("c", 100)], 1.0);
        assert_eq!(slices[0].start_deg, 90.0);
        assert_eq!(slices[1].start_deg, slices[0].end_deg);
        assert!((slices[2].end_deg - 450.0).abs() < 1e-9);
    }

    #[test]
    fn nothing_to_draw_for_zero_total() {
        assert!(pie_slices(&[], 1.0).is_empty());
        assert!(pie_slices(&[total("refund", -500), total("none", 0)], 1.0).is_empty());
    }
}
