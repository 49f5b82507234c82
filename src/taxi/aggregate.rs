// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{HourlyAverage, LocationRevenue, TripRecord};
use chrono::Timelike;
use std::collections::BTreeMap;

/// Total `total_amount` per pickup location, largest first. Locations with
/// equal revenue stay in ascending id order; trips without a pickup
/// location are not counted.
pub fn revenue_by_location(trips: &[TripRecord]) -> Vec<LocationRevenue> {
    let mut sums: BTreeMap<i64, f64> = BTreeMap::new();
    for t in trips {
        if let Some(loc) = t.pu_location_id {
            *sums.entry(loc).or_insert(0.0) += t.total_amount.unwrap_or(0.0);
        }
    }
    let mut out: Vec<LocationRevenue> = sums
        .into_iter()
        .map(|(location_id, total_amount)| LocationRevenue {
            location_id,
            total_amount,
        })
        .collect();
    out.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    out
}

/// Mean `total_amount` per pickup hour of day, pooled across dates. Hours
/// without a single amount are left out.
pub fn mean_by_hour(trips: &[TripRecord]) -> Vec<HourlyAverage> {
    let mut acc: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for t in trips {
        if let Some(amount) = t.total_amount {
            let e = acc.entry(t.pickup.hour()).or_insert((0.0, 0));
            e.0 += amount;
            e.1 += 1;
        }
    }
    acc.into_iter()
        .map(|(hour, (sum, n))| HourlyAverage {
            hour,
            mean_total: sum / n as f64,
        })
        .collect()
}

/// The `n` best locations, in revenue order.
pub fn top_locations(revenue: &[LocationRevenue], n: usize) -> &[LocationRevenue] {
    &revenue[..revenue.len().min(n)]
}
