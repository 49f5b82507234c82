// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::charts::{prepare_output, FONT};
use crate::error::PipelineError;
use crate::models::{HourlyAverage, LocationRevenue};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1200, 800);

fn headroom(max: f64) -> f64 {
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Bar chart of the given locations, in the order given.
pub fn render_top_revenue(path: &Path, top: &[LocationRevenue]) -> Result<bool> {
    if top.is_empty() {
        tracing::warn!(chart = %path.display(), "no locations, chart skipped");
        return Ok(false);
    }
    prepare_output(path)?;
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PipelineError::render)?;

    let n = top.len() as u32;
    let max = top.iter().map(|r| r.total_amount).fold(0.0, f64::max);
    let mut chart = ChartBuilder::on(&root)
        .caption("Top 10 locations by revenue", (FONT, 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..headroom(max))
        .map_err(PipelineError::render)?;

    let label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => top
            .get(*i as usize)
            .map(|r| r.location_id.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(top.len())
        .x_label_formatter(&label)
        .x_desc("PULocationID")
        .y_desc("Total Amount")
        .draw()
        .map_err(PipelineError::render)?;
    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(8)
                .data(top.iter().enumerate().map(|(i, r)| (i as u32, r.total_amount))),
        )
        .map_err(PipelineError::render)?;

    root.present().map_err(PipelineError::render)?;
    Ok(true)
}

/// Line with point markers of the mean check per pickup hour.
pub fn render_hourly(path: &Path, hourly: &[HourlyAverage]) -> Result<bool> {
    if hourly.is_empty() {
        tracing::warn!(chart = %path.display(), "no hourly data, chart skipped");
        return Ok(false);
    }
    prepare_output(path)?;
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PipelineError::render)?;

    let max = hourly.iter().map(|h| h.mean_total).fold(0.0, f64::max);
    let mut chart = ChartBuilder::on(&root)
        .caption("Average revenue per hour", (FONT, 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0u32..23u32, 0f64..headroom(max))
        .map_err(PipelineError::render)?;
    chart
        .configure_mesh()
        .x_labels(24)
        .x_desc("Hour")
        .y_desc("Total Amount")
        .draw()
        .map_err(PipelineError::render)?;

    let points: Vec<(u32, f64)> = hourly.iter().map(|h| (h.hour, h.mean_total)).collect();
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(PipelineError::render)?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
        .map_err(PipelineError::render)?;

    root.present().map_err(PipelineError::render)?;
    Ok(true)
}

/// Five-number summary drawn by [`render_duration_box`]. Whiskers end at
/// the most extreme data point within 1.5 IQR of the box; anything beyond
/// is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);
    let reach = 1.5 * (q3 - q1);
    let (lo_fence, hi_fence) = (q1 - reach, q3 + reach);

    let mut inside = sorted
        .iter()
        .copied()
        .filter(|v| (lo_fence..=hi_fence).contains(v));
    let lower_whisker = inside.next().unwrap_or(q1);
    let upper_whisker = inside.last().unwrap_or(lower_whisker);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lo_fence || *v > hi_fence)
        .collect();

    Some(BoxStats {
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

/// Box plot of trip durations in minutes.
pub fn render_duration_box(path: &Path, durations: &[f64], max_minutes: f64) -> Result<bool> {
    let Some(stats) = box_stats(durations) else {
        tracing::warn!(chart = %path.display(), "no trips, chart skipped");
        return Ok(false);
    };
    prepare_output(path)?;
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PipelineError::render)?;

    let smallest = stats.outliers.iter().copied().fold(stats.lower_whisker, f64::min);
    let largest = stats.outliers.iter().copied().fold(stats.upper_whisker, f64::max);
    let lo = smallest.min(0.0);
    let hi = headroom(largest);
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Trip Duration Distribution (< {} min)", max_minutes),
            (FONT, 30),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-1f64..1f64, lo..hi)
        .map_err(PipelineError::render)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(3)
        .x_label_formatter(&|x: &f64| {
            if x.abs() < 1e-9 {
                "trip_duration_min".to_string()
            } else {
                String::new()
            }
        })
        .y_desc("Minutes")
        .draw()
        .map_err(PipelineError::render)?;

    let (half, cap) = (0.25, 0.12);
    let line = BLUE.stroke_width(2);
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(-half, stats.q1), (half, stats.q3)],
            line,
        )))
        .map_err(PipelineError::render)?;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(-half, stats.median), (half, stats.median)],
            RGBColor(255, 127, 14).stroke_width(2),
        )))
        .map_err(PipelineError::render)?;
    let whiskers = [
        vec![(0.0, stats.q1), (0.0, stats.lower_whisker)],
        vec![(0.0, stats.q3), (0.0, stats.upper_whisker)],
        vec![(-cap, stats.lower_whisker), (cap, stats.lower_whisker)],
        vec![(-cap, stats.upper_whisker), (cap, stats.upper_whisker)],
    ];
    chart
        .draw_series(whiskers.into_iter().map(|pts| PathElement::new(pts, line)))
        .map_err(PipelineError::render)?;
    chart
        .draw_series(stats.outliers.iter().map(|&v| Circle::new((0.0, v), 4, BLACK.stroke_width(1))))
        .map_err(PipelineError::render)?;

    root.present().map_err(PipelineError::render)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whiskers_stop_at_data_inside_the_fences() {
        let stats = box_stats(&[6.6, 19.2, 20.0, 3.0, 45.0]).unwrap();
        assert_eq!(stats.q1, 6.6);
        assert_eq!(stats.median, 19.2);
        assert_eq!(stats.q3, 20.0);
        // fences at -13.5 and 40.1
        assert_eq!(stats.lower_whisker, 3.0);
        assert_eq!(stats.upper_whisker, 20.0);
        assert_eq!(stats.outliers, vec![45.0]);
    }

    #[test]
    fn percentiles_interpolate_between_ranks() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!((stats.lower_whisker, stats.upper_whisker), (1.0, 4.0));
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn empty_input_has_no_summary() {
        assert!(box_stats(&[]).is_none());
        assert!(box_stats(&[f64::NAN]).is_none());
    }

    #[test]
    fn duration_box_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duration.png");
        assert!(render_duration_box(&path, &[6.6, 19.2, 20.0, 3.0, 45.0], 186.0).unwrap());
        assert!(path.exists());
        assert!(!render_duration_box(&dir.path().join("none.png"), &[], 186.0).unwrap());
    }
}
