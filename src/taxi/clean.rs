// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cleaning runs as a fixed sequence of stages. Each stage is a plain
//! function so it can be tested alone; [`clean`] strings them together and
//! counts what every stage drops.
//!
//! The tip percentage divides by the fare, so it is only computable from a
//! [`PositiveFare`], which only [`require_positive_fare`] hands out.

use crate::config::CleanConfig;
use crate::error::PipelineError;
use crate::models::TripRecord;
use crate::taxi::loader::RawTrip;
use crate::utils::parse_datetime;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Presentation order of the cleaned table.
pub const CLEAN_COLUMN_ORDER: [&str; 20] = [
    "VendorID",
    "tpep_pickup_datetime",
    "tpep_dropoff_datetime",
    "trip_duration_min",
    "passenger_count",
    "trip_distance",
    "RatecodeID",
    "store_and_fwd_flag",
    "PULocationID",
    "DOLocationID",
    "payment_type",
    "fare_amount",
    "extra",
    "mta_tax",
    "tip_amount",
    "tip_percent",
    "tolls_amount",
    "improvement_surcharge",
    "total_amount",
    "congestion_surcharge",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PositiveDistance,
    Passengers,
    PositiveFare,
    PickupCutoff,
    DurationCeiling,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::PositiveDistance => "trip_distance > 0",
            Stage::Passengers => "passenger_count != 0",
            Stage::PositiveFare => "fare_amount > 0",
            Stage::PickupCutoff => "pickup on or after cutoff",
            Stage::DurationCeiling => "duration below ceiling",
        };
        f.write_str(s)
    }
}

/// A fare known to be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PositiveFare(f64);

impl PositiveFare {
    pub fn new(fare: Option<f64>) -> Option<Self> {
        fare.filter(|f| *f > 0.0).map(Self)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `tip / fare * 100`.
    pub fn tip_percent(&self, tip: f64) -> f64 {
        tip / self.0 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrip {
    pub raw: RawTrip,
    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaredTrip {
    pub trip: ParsedTrip,
    pub fare: PositiveFare,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub loaded: usize,
    pub dropped: Vec<(Stage, usize)>,
    pub kept: usize,
}

#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub trips: Vec<TripRecord>,
    pub report: StageReport,
}

pub fn parse_timestamps(raw: RawTrip) -> Result<ParsedTrip, PipelineError> {
    let line = raw.line;
    let pickup = parse_datetime(&raw.tpep_pickup_datetime);
    let dropoff = parse_datetime(&raw.tpep_dropoff_datetime);
    match (pickup, dropoff) {
        (Ok(pickup), Ok(dropoff)) => Ok(ParsedTrip {
            raw,
            pickup,
            dropoff,
        }),
        (Err(e), _) | (_, Err(e)) => Err(PipelineError::MalformedRow {
            line,
            reason: e.to_string(),
        }),
    }
}

pub fn has_positive_distance(t: &ParsedTrip) -> bool {
    t.raw.trip_distance.is_some_and(|d| d > 0.0)
}

/// An unknown passenger count is kept; only an explicit zero is dropped.
pub fn has_passengers(t: &ParsedTrip) -> bool {
    t.raw.passenger_count != Some(0.0)
}

pub fn require_positive_fare(t: ParsedTrip) -> Option<FaredTrip> {
    PositiveFare::new(t.raw.fare_amount).map(|fare| FaredTrip { trip: t, fare })
}

pub fn picked_up_on_or_after(t: &FaredTrip, cutoff: NaiveDate) -> bool {
    t.trip.pickup.date() >= cutoff
}

pub fn derive_columns(t: FaredTrip) -> TripRecord {
    let FaredTrip { trip, fare } = t;
    let ParsedTrip {
        raw,
        pickup,
        dropoff,
    } = trip;
    let duration = (dropoff - pickup).num_milliseconds() as f64 / 60_000.0;
    TripRecord {
        vendor_id: raw.vendor_id.map(|v| v as i64),
        pickup,
        dropoff,
        trip_duration_min: duration,
        passenger_count: raw.passenger_count.map(|v| v as i64),
        trip_distance: raw.trip_distance.unwrap_or_default(),
        ratecode_id: raw.ratecode_id.map(|v| v as i64),
        store_and_fwd_flag: raw.store_and_fwd_flag.filter(|s| !s.is_empty()),
        pu_location_id: raw.pu_location_id.map(|v| v as i64),
        do_location_id: raw.do_location_id.map(|v| v as i64),
        payment_type: raw.payment_type.map(|v| v as i64),
        fare_amount: fare.value(),
        extra: raw.extra,
        mta_tax: raw.mta_tax,
        tip_amount: raw.tip_amount,
        tip_percent: raw.tip_amount.map(|tip| fare.tip_percent(tip)),
        tolls_amount: raw.tolls_amount,
        improvement_surcharge: raw.improvement_surcharge,
        total_amount: raw.total_amount,
        congestion_surcharge: raw.congestion_surcharge,
    }
}

pub fn below_duration(t: &TripRecord, max_minutes: f64) -> bool {
    t.trip_duration_min < max_minutes
}

/// Runs every stage in order over `raw`.
pub fn clean(raw: Vec<RawTrip>, cfg: &CleanConfig) -> Result<CleanOutcome, PipelineError> {
    let loaded = raw.len();
    let parsed = raw
        .into_iter()
        .map(parse_timestamps)
        .collect::<Result<Vec<_>, _>>()?;

    let mut dropped = Vec::new();
    let mut count = |stage: Stage, before: usize, after: usize| {
        dropped.push((stage, before - after));
    };

    let before = parsed.len();
    let parsed: Vec<ParsedTrip> = parsed.into_iter().filter(has_positive_distance).collect();
    count(Stage::PositiveDistance, before, parsed.len());

    let before = parsed.len();
    let parsed: Vec<ParsedTrip> = parsed.into_iter().filter(has_passengers).collect();
    count(Stage::Passengers, before, parsed.len());

    let before = parsed.len();
    let fared: Vec<FaredTrip> = parsed.into_iter().filter_map(require_positive_fare).collect();
    count(Stage::PositiveFare, before, fared.len());

    let before = fared.len();
    let fared: Vec<FaredTrip> = fared
        .into_iter()
        .filter(|t| picked_up_on_or_after(t, cfg.pickup_cutoff))
        .collect();
    count(Stage::PickupCutoff, before, fared.len());

    let before = fared.len();
    let trips: Vec<TripRecord> = fared
        .into_iter()
        .map(derive_columns)
        .filter(|t| below_duration(t, cfg.max_duration_min))
        .collect();
    count(Stage::DurationCeiling, before, trips.len());

    let kept = trips.len();
    Ok(CleanOutcome {
        trips,
        report: StageReport {
            loaded,
            dropped,
            kept,
        },
    })
}
