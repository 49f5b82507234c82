// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the expense export. Exactly one of `outcome` / `income` is
/// expected to be non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: String,
    pub outcome: Decimal,
    pub outcome_currency: String,
    pub income: Decimal,
    pub income_currency: String,
}

/// Summed amount for one (category, currency) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub currency: String,
    pub amount: Decimal,
}

/// A category total once the currency column has been dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// A cleaned yellow-cab trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub vendor_id: Option<i64>,
    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,
    pub trip_duration_min: f64,
    pub passenger_count: Option<i64>,
    pub trip_distance: f64,
    pub ratecode_id: Option<i64>,
    pub store_and_fwd_flag: Option<String>,
    pub pu_location_id: Option<i64>,
    pub do_location_id: Option<i64>,
    pub payment_type: Option<i64>,
    pub fare_amount: f64,
    pub extra: Option<f64>,
    pub mta_tax: Option<f64>,
    pub tip_amount: Option<f64>,
    pub tip_percent: Option<f64>,
    pub tolls_amount: Option<f64>,
    pub improvement_surcharge: Option<f64>,
    pub total_amount: Option<f64>,
    pub congestion_surcharge: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRevenue {
    pub location_id: i64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyAverage {
    pub hour: u32,
    pub mean_total: f64,
}
