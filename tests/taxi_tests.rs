// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Timelike};
use flatreports::cli;
use flatreports::commands::pipe;
use flatreports::config::CleanConfig;
use flatreports::models::{HourlyAverage, LocationRevenue};
use flatreports::taxi::persist::{
    describe, read_hourly, read_revenue, write_hourly, write_revenue,
};
use flatreports::taxi::{
    clean, mean_by_hour, read_sample, revenue_by_location, top_locations, CLEAN_COLUMN_ORDER,
};
use std::path::Path;
use tempfile::tempdir;

const HEADER: &str = "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,RatecodeID,store_and_fwd_flag,PULocationID,DOLocationID,payment_type,fare_amount,extra,mta_tax,tip_amount,tolls_amount,improvement_surcharge,total_amount,congestion_surcharge";

const ROWS: &str = "\
1,2019-01-01 00:46:40,2019-01-01 00:53:20,1,1.5,1,N,151,239,1,7,0.5,0.5,1.65,0,0.3,10,0
1,2019-01-01 00:59:47,2019-01-01 01:18:59,1,2.6,1,N,239,246,1,14,0.5,0.5,1,0,0.3,20,0
2,2019-01-01 01:10:00,2019-01-01 01:30:00,,3.0,1,N,151,100,2,12,0.5,0.5,0,0,0.3,30,0
2,2019-01-02 00:20:00,2019-01-02 00:35:00,2,0,1,N,151,100,1,9,0.5,0.5,2,0,0.3,12.3,0
2,2019-01-02 00:30:00,2019-01-02 00:40:00,1,1.2,1,N,42,100,1,0,0.5,0.5,2,0,0.3,3.3,0
1,2019-01-02 00:40:00,2019-01-02 00:50:00,0,1.1,1,N,42,100,1,6,0.5,0.5,0,0,0.3,7.3,0
1,2018-12-31 23:40:00,2019-01-01 00:05:00,1,4.0,1,N,42,100,1,15,0.5,0.5,0,0,0.3,16.3,0
1,2019-01-02 02:00:00,2019-01-02 05:30:00,1,40.0,1,N,42,100,1,150,0.5,0.5,0,0,0.3,151.3,0
1,2019-01-02 00:10:00,2019-01-02 00:25:00,1,2.2,1,Y,42,100,1,10,0.5,0.5,2.5,0,0.3,40,0
";

fn write_source(dir: &Path) -> String {
    let path = dir.join("yellow.csv");
    std::fs::write(&path, format!("{}\n{}", HEADER, ROWS)).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn cleaned_trips_satisfy_every_filter() {
    let raw = read_sample(format!("{}\n{}", HEADER, ROWS).as_bytes(), 100).unwrap();
    let out = clean(raw, &CleanConfig::default()).unwrap();
    let cutoff = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();

    assert_eq!(out.report.loaded, 9);
    assert_eq!(out.trips.len(), 4);
    for t in &out.trips {
        assert!(t.trip_distance > 0.0);
        assert!(t.fare_amount > 0.0);
        assert_ne!(t.passenger_count, Some(0));
        assert!(t.pickup.date() >= cutoff);
        assert!(t.trip_duration_min < 186.0);
    }
    // the zero-fare row is gone even though everything else about it is valid
    assert!(out.trips.iter().all(|t| t.total_amount != Some(3.3)));
}

#[test]
fn revenue_totals_are_conserved_and_sorted() {
    let raw = read_sample(format!("{}\n{}", HEADER, ROWS).as_bytes(), 100).unwrap();
    let trips = clean(raw, &CleanConfig::default()).unwrap().trips;
    let revenue = revenue_by_location(&trips);

    // 42 and 151 tie; the lower id comes first
    assert_eq!(
        revenue,
        vec![
            LocationRevenue {
                location_id: 42,
                total_amount: 40.0
            },
            LocationRevenue {
                location_id: 151,
                total_amount: 40.0
            },
            LocationRevenue {
                location_id: 239,
                total_amount: 20.0
            },
        ]
    );
    let grouped: f64 = revenue.iter().map(|r| r.total_amount).sum();
    let raw_total: f64 = trips.iter().filter_map(|t| t.total_amount).sum();
    assert_eq!(grouped, raw_total);
    assert_eq!(top_locations(&revenue, 2).len(), 2);
}

#[test]
fn hourly_means_pool_all_dates() {
    let raw = read_sample(format!("{}\n{}", HEADER, ROWS).as_bytes(), 100).unwrap();
    let trips = clean(raw, &CleanConfig::default()).unwrap().trips;
    let hourly = mean_by_hour(&trips);

    // hour 0 holds trips from two different days: 10, 20 and 40
    assert_eq!(
        hourly,
        vec![
            HourlyAverage {
                hour: 0,
                mean_total: 70.0 / 3.0
            },
            HourlyAverage {
                hour: 1,
                mean_total: 30.0
            },
        ]
    );
    assert!(trips.iter().all(|t| t.pickup.hour() <= 1));
}

#[test]
fn aggregate_parquet_round_trips_exactly() {
    let dir = tempdir().unwrap();
    let revenue = vec![
        LocationRevenue {
            location_id: 132,
            total_amount: 1234.5678901234,
        },
        LocationRevenue {
            location_id: 7,
            total_amount: 0.1 + 0.2,
        },
    ];
    let hourly = vec![
        HourlyAverage {
            hour: 0,
            mean_total: 17.333333333333332,
        },
        HourlyAverage {
            hour: 23,
            mean_total: 21.05,
        },
    ];
    let rev_path = dir.path().join("out/revenue_by_loc.parquet");
    let hour_path = dir.path().join("out/check_by_hour.parquet");
    write_revenue(&rev_path, &revenue).unwrap();
    write_hourly(&hour_path, &hourly).unwrap();

    assert_eq!(read_revenue(&rev_path).unwrap(), revenue);
    assert_eq!(read_hourly(&hour_path).unwrap(), hourly);
}

#[test]
fn pipe_command_writes_parquet_and_plots() {
    let dir = tempdir().unwrap();
    let src = write_source(dir.path());
    let out_dir = dir.path().join("processed");
    let plots = dir.path().join("plots");
    let out_str = out_dir.to_string_lossy().to_string();
    let plots_str = plots.to_string_lossy().to_string();

    let matches = cli::build_taxi_cli().get_matches_from([
        "taxi-pipe",
        "--src",
        &src,
        "--sample",
        "8",
        "--out-dir",
        &out_str,
        "--plots-dir",
        &plots_str,
    ]);
    let cfg = pipe::config_from(&matches).unwrap();
    assert_eq!(cfg.sample_rows, 8);
    let report = pipe::run(&cfg).unwrap();
    // the ninth row is outside the sample
    assert_eq!(report.loaded, 8);
    assert_eq!(report.kept, 3);

    let (rows, columns) = describe(&cfg.clean_path()).unwrap();
    assert_eq!(rows, 3);
    assert_eq!(columns, CLEAN_COLUMN_ORDER.to_vec());

    let revenue = read_revenue(&cfg.revenue_path()).unwrap();
    assert_eq!(revenue[0].location_id, 151);
    assert_eq!(revenue[0].total_amount, 40.0);
    assert_eq!(read_hourly(&cfg.hourly_path()).unwrap().len(), 2);

    for png in ["revenue_top10.png", "check_by_hour.png", "duration_distribution.png"] {
        assert!(plots.join(png).exists(), "{} missing", png);
    }
}

#[test]
fn missing_source_is_rejected() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    let missing_str = missing.to_string_lossy().to_string();
    let matches = cli::build_taxi_cli().get_matches_from(["taxi-pipe", "--src", &missing_str]);
    assert!(pipe::config_from(&matches).is_err());
}

#[test]
fn open_data_timestamps_and_missing_location_are_tolerated() {
    let body = "\
1,01/01/2019 12:46:40 AM,01/01/2019 12:53:20 AM,1,1.5,1,N,151,239,1,7,0.5,0.5,1.65,0,0.3,10,0
1,01/01/2019 01:10:00 PM,01/01/2019 01:30:00 PM,1,3.0,1,N,,100,1,12,0.5,0.5,0,0,0.3,30,0
";
    let raw = read_sample(format!("{}\n{}", HEADER, body).as_bytes(), 100).unwrap();
    let trips = clean(raw, &CleanConfig::default()).unwrap().trips;
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].pickup.hour(), 0);
    assert_eq!(trips[1].pickup.hour(), 13);
    assert_eq!(trips[1].pu_location_id, None);

    // the trip without a pickup location is left out of the revenue table
    assert_eq!(
        revenue_by_location(&trips),
        vec![LocationRevenue {
            location_id: 151,
            total_amount: 10.0
        }]
    );
    assert_eq!(mean_by_hour(&trips).len(), 2);
}
