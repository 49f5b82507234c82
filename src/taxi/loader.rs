// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A trip as it appears in the yellow-cab CSV, before any typing beyond
/// numbers. Id-like columns are read as floats since some exports write
/// them as `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "VendorID", default)]
    pub vendor_id: Option<f64>,
    pub tpep_pickup_datetime: String,
    pub tpep_dropoff_datetime: String,
    #[serde(default)]
    pub passenger_count: Option<f64>,
    #[serde(default)]
    pub trip_distance: Option<f64>,
    #[serde(rename = "RatecodeID", default)]
    pub ratecode_id: Option<f64>,
    #[serde(default)]
    pub store_and_fwd_flag: Option<String>,
    #[serde(rename = "PULocationID", default)]
    pub pu_location_id: Option<f64>,
    #[serde(rename = "DOLocationID", default)]
    pub do_location_id: Option<f64>,
    #[serde(default)]
    pub payment_type: Option<f64>,
    #[serde(default)]
    pub fare_amount: Option<f64>,
    #[serde(default)]
    pub extra: Option<f64>,
    #[serde(default)]
    pub mta_tax: Option<f64>,
    #[serde(default)]
    pub tip_amount: Option<f64>,
    #[serde(default)]
    pub tolls_amount: Option<f64>,
    #[serde(default)]
    pub improvement_surcharge: Option<f64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub congestion_surcharge: Option<f64>,
    /// 1-based line in the source file.
    #[serde(skip)]
    pub line: u64,
}

pub fn load_sample(path: &Path, rows: usize) -> Result<Vec<RawTrip>> {
    let file = File::open(path).with_context(|| format!("Open CSV {}", path.display()))?;
    read_sample(file, rows).with_context(|| format!("Read trips from {}", path.display()))
}

/// Reads at most `rows` data rows from the head of a comma-separated file.
pub fn read_sample<R: Read>(input: R, rows: usize) -> Result<Vec<RawTrip>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);
    let headers = rdr.headers()?.clone();

    let mut out = Vec::with_capacity(rows.min(1 << 16));
    let mut rec = StringRecord::new();
    while out.len() < rows && rdr.read_record(&mut rec)? {
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        let mut trip: RawTrip = rec
            .deserialize(Some(&headers))
            .map_err(|e| PipelineError::MalformedRow {
                line,
                reason: e.to_string(),
            })?;
        trip.line = line;
        out.push(trip);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,RatecodeID,store_and_fwd_flag,PULocationID,DOLocationID,payment_type,fare_amount,extra,mta_tax,tip_amount,tolls_amount,improvement_surcharge,total_amount,congestion_surcharge";

    #[test]
    fn stops_after_sample_size() {
        let csv = format!(
            "{HEAD}\n\
             1,2019-01-01 00:46:40,2019-01-01 00:53:20,1,1.5,1,N,151,239,1,7,0.5,0.5,1.65,0,0.3,9.95,\n\
             2,2019-01-01 00:59:47,2019-01-01 01:18:59,,2.6,1,N,239,246,1,14,0.5,0.5,1,0,0.3,16.3,2.5\n\
             1,2019-01-01 01:00:00,2019-01-01 01:10:00,1,1.0,1,N,1,2,1,5,0,0,0,0,0,5,0\n"
        );
        let rows = read_sample(csv.as_bytes(), 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pu_location_id, Some(151.0));
        assert_eq!(rows[0].congestion_surcharge, None);
        assert_eq!(rows[1].passenger_count, None);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn non_numeric_fare_is_an_error() {
        let csv = format!(
            "{HEAD}\n1,2019-01-01 00:46:40,2019-01-01 00:53:20,1,1.5,1,N,151,239,1,seven,0.5,0.5,1.65,0,0.3,9.95,0\n"
        );
        let err = read_sample(csv.as_bytes(), 10).unwrap_err();
        assert!(format!("{:#}", err).contains("row 2"));
    }
}
