// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{HourlyAverage, LocationRevenue, TripRecord};
use crate::taxi::clean::CLEAN_COLUMN_ORDER;
use crate::utils::ensure_parent;
use anyhow::{anyhow, Context, Result};
use parquet::basic::{Compression, ConvertedType, Repetition, Type as PhysicalType};
use parquet::column::writer::ColumnWriterImpl;
use parquet::data_type::{ByteArray, ByteArrayType, DataType, DoubleType, Int64Type};
use parquet::file::properties::WriterProperties;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::file::writer::{SerializedColumnWriter, SerializedFileWriter};
use parquet::record::{Row, RowAccessor};
use parquet::schema::types::Type;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub const LOCATION_COLUMN: &str = "PULocationID";
pub const HOUR_COLUMN: &str = "Hour";
pub const AMOUNT_COLUMN: &str = "Total Amount";

enum Values {
    Int64(Vec<Option<i64>>),
    Double(Vec<Option<f64>>),
    Utf8(Vec<Option<String>>),
}

struct Column {
    name: &'static str,
    repetition: Repetition,
    converted: ConvertedType,
    values: Values,
}

impl Column {
    fn required_i64(name: &'static str, values: impl Iterator<Item = i64>) -> Self {
        Self::new(name, Repetition::REQUIRED, Values::Int64(values.map(Some).collect()))
    }

    fn optional_i64(name: &'static str, values: impl Iterator<Item = Option<i64>>) -> Self {
        Self::new(name, Repetition::OPTIONAL, Values::Int64(values.collect()))
    }

    fn timestamp(name: &'static str, values: impl Iterator<Item = i64>) -> Self {
        let mut c = Self::required_i64(name, values);
        c.converted = ConvertedType::TIMESTAMP_MICROS;
        c
    }

    fn required_f64(name: &'static str, values: impl Iterator<Item = f64>) -> Self {
        Self::new(name, Repetition::REQUIRED, Values::Double(values.map(Some).collect()))
    }

    fn optional_f64(name: &'static str, values: impl Iterator<Item = Option<f64>>) -> Self {
        Self::new(name, Repetition::OPTIONAL, Values::Double(values.collect()))
    }

    fn optional_utf8(name: &'static str, values: impl Iterator<Item = Option<String>>) -> Self {
        let mut c = Self::new(name, Repetition::OPTIONAL, Values::Utf8(values.collect()));
        c.converted = ConvertedType::UTF8;
        c
    }

    fn new(name: &'static str, repetition: Repetition, values: Values) -> Self {
        Self {
            name,
            repetition,
            converted: ConvertedType::NONE,
            values,
        }
    }

    fn schema_type(&self) -> Result<Type> {
        let physical = match self.values {
            Values::Int64(_) => PhysicalType::INT64,
            Values::Double(_) => PhysicalType::DOUBLE,
            Values::Utf8(_) => PhysicalType::BYTE_ARRAY,
        };
        Ok(Type::primitive_type_builder(self.name, physical)
            .with_repetition(self.repetition)
            .with_converted_type(self.converted)
            .build()?)
    }

    fn write(&self, cw: &mut SerializedColumnWriter<'_>) -> Result<()> {
        let optional = self.repetition == Repetition::OPTIONAL;
        match &self.values {
            Values::Int64(v) => write_values(cw.typed::<Int64Type>(), v, optional, |x: &i64| *x),
            Values::Double(v) => write_values(cw.typed::<DoubleType>(), v, optional, |x: &f64| *x),
            Values::Utf8(v) => write_values(cw.typed::<ByteArrayType>(), v, optional, |s: &String| {
                ByteArray::from(s.as_str())
            }),
        }
    }
}

fn write_values<T, V, F>(
    w: &mut ColumnWriterImpl<'_, T>,
    values: &[Option<V>],
    optional: bool,
    conv: F,
) -> Result<()>
where
    T: DataType,
    F: Fn(&V) -> T::T,
{
    let mut present = Vec::with_capacity(values.len());
    let mut defs = Vec::with_capacity(values.len());
    for v in values {
        match v {
            Some(x) => {
                present.push(conv(x));
                defs.push(1i16);
            }
            None if optional => defs.push(0),
            None => return Err(anyhow!("missing value in a required column")),
        }
    }
    let def_levels = if optional { Some(defs.as_slice()) } else { None };
    w.write_batch(&present[..], def_levels, None)?;
    Ok(())
}

fn write_table(path: &Path, message: &str, columns: Vec<Column>) -> Result<()> {
    ensure_parent(path)?;
    let fields = columns
        .iter()
        .map(|c| c.schema_type().map(Arc::new))
        .collect::<Result<Vec<_>>>()?;
    let schema = Arc::new(Type::group_type_builder(message).with_fields(fields).build()?);
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build(),
    );

    let file = File::create(path).with_context(|| format!("Create {}", path.display()))?;
    let mut writer = SerializedFileWriter::new(file, schema, props)?;
    let mut rg = writer.next_row_group()?;
    for col in &columns {
        let mut cw = rg
            .next_column()?
            .ok_or_else(|| anyhow!("schema mismatch at column {}", col.name))?;
        col.write(&mut cw)
            .with_context(|| format!("Write column {}", col.name))?;
        cw.close()?;
    }
    rg.close()?;
    writer.close()?;
    tracing::debug!(path = %path.display(), "parquet written");
    Ok(())
}

/// Writes the cleaned trips with columns in [`CLEAN_COLUMN_ORDER`].
pub fn write_clean(path: &Path, trips: &[TripRecord]) -> Result<()> {
    let micros = |f: fn(&TripRecord) -> chrono::NaiveDateTime| {
        trips.iter().map(move |t| f(t).and_utc().timestamp_micros())
    };
    let [vendor, pickup, dropoff, duration, passengers, distance, ratecode, flag, pu, dol, payment, fare, extra, mta, tip, tip_pct, tolls, improvement, total, congestion] =
        CLEAN_COLUMN_ORDER;
    let columns = vec![
        Column::optional_i64(vendor, trips.iter().map(|t| t.vendor_id)),
        Column::timestamp(pickup, micros(|t| t.pickup)),
        Column::timestamp(dropoff, micros(|t| t.dropoff)),
        Column::required_f64(duration, trips.iter().map(|t| t.trip_duration_min)),
        Column::optional_i64(passengers, trips.iter().map(|t| t.passenger_count)),
        Column::required_f64(distance, trips.iter().map(|t| t.trip_distance)),
        Column::optional_i64(ratecode, trips.iter().map(|t| t.ratecode_id)),
        Column::optional_utf8(flag, trips.iter().map(|t| t.store_and_fwd_flag.clone())),
        Column::optional_i64(pu, trips.iter().map(|t| t.pu_location_id)),
        Column::optional_i64(dol, trips.iter().map(|t| t.do_location_id)),
        Column::optional_i64(payment, trips.iter().map(|t| t.payment_type)),
        Column::required_f64(fare, trips.iter().map(|t| t.fare_amount)),
        Column::optional_f64(extra, trips.iter().map(|t| t.extra)),
        Column::optional_f64(mta, trips.iter().map(|t| t.mta_tax)),
        Column::optional_f64(tip, trips.iter().map(|t| t.tip_amount)),
        Column::optional_f64(tip_pct, trips.iter().map(|t| t.tip_percent)),
        Column::optional_f64(tolls, trips.iter().map(|t| t.tolls_amount)),
        Column::optional_f64(improvement, trips.iter().map(|t| t.improvement_surcharge)),
        Column::optional_f64(total, trips.iter().map(|t| t.total_amount)),
        Column::optional_f64(congestion, trips.iter().map(|t| t.congestion_surcharge)),
    ];
    write_table(path, "taxi_clean", columns)
}

pub fn write_revenue(path: &Path, rows: &[LocationRevenue]) -> Result<()> {
    write_table(
        path,
        "revenue_by_loc",
        vec![
            Column::required_i64(LOCATION_COLUMN, rows.iter().map(|r| r.location_id)),
            Column::required_f64(AMOUNT_COLUMN, rows.iter().map(|r| r.total_amount)),
        ],
    )
}

pub fn write_hourly(path: &Path, rows: &[HourlyAverage]) -> Result<()> {
    write_table(
        path,
        "check_by_hour",
        vec![
            Column::required_i64(HOUR_COLUMN, rows.iter().map(|r| i64::from(r.hour))),
            Column::required_f64(AMOUNT_COLUMN, rows.iter().map(|r| r.mean_total)),
        ],
    )
}

fn read_rows<T>(path: &Path, f: impl Fn(&Row) -> Result<T>) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("Open {}", path.display()))?;
    let reader = SerializedFileReader::new(file)?;
    let mut out = Vec::new();
    for row in reader.get_row_iter(None)? {
        out.push(f(&row?)?);
    }
    Ok(out)
}

pub fn read_revenue(path: &Path) -> Result<Vec<LocationRevenue>> {
    read_rows(path, |r| {
        Ok(LocationRevenue {
            location_id: r.get_long(0)?,
            total_amount: r.get_double(1)?,
        })
    })
}

pub fn read_hourly(path: &Path) -> Result<Vec<HourlyAverage>> {
    read_rows(path, |r| {
        Ok(HourlyAverage {
            hour: u32::try_from(r.get_long(0)?)?,
            mean_total: r.get_double(1)?,
        })
    })
}

/// Row count and column names of a parquet file, read from its footer.
pub fn describe(path: &Path) -> Result<(i64, Vec<String>)> {
    let file = File::open(path).with_context(|| format!("Open {}", path.display()))?;
    let reader = SerializedFileReader::new(file)?;
    let meta = reader.metadata().file_metadata();
    let names = meta
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    Ok((meta.num_rows(), names))
}
