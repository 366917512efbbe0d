//! Historical observation files, one row per city and hour.
//!
//! Files are written as CSV with a header or as Snappy-compressed parquet, with the
//! columns listed in [`COLUMNS`]. An unknown UV index is stored as null.

pub mod error;

use crate::dataset::error::DatasetError;
use crate::types::observation::{HourlyObservation, UvIndex};
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const COL_CITY: &str = "city";
const COL_DATE_TIME: &str = "date_time";
const COL_UV_INDEX: &str = "uv_index";
const COL_CONDITION: &str = "condition";

/// Measurement columns, in file order, with the observation field they hold.
const MEASUREMENT_COLUMNS: [(&str, fn(&HourlyObservation) -> f64); 9] = [
    ("temp_c", |o| o.temp_c),
    ("humidity", |o| o.humidity),
    ("wind_kmph", |o| o.wind_kmph),
    ("precip_mm", |o| o.precip_mm),
    ("atmospheric_pressure", |o| o.atmospheric_pressure),
    ("visibility", |o| o.visibility),
    ("dew_point", |o| o.dew_point),
    ("wind_gust", |o| o.wind_gust),
    ("cloud_cover_pct", |o| o.cloud_cover_pct),
];

/// Column order of dataset files.
pub const COLUMNS: [&str; 13] = [
    COL_CITY,
    COL_DATE_TIME,
    "temp_c",
    "humidity",
    "wind_kmph",
    "precip_mm",
    "atmospheric_pressure",
    "visibility",
    "dew_point",
    "wind_gust",
    "cloud_cover_pct",
    COL_UV_INDEX,
    COL_CONDITION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Parquet,
}

impl DatasetFormat {
    /// `.parquet` files are parquet, anything else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => DatasetFormat::Parquet,
            _ => DatasetFormat::Csv,
        }
    }
}

/// Builds the dataset frame for `observations`.
pub fn to_frame(observations: &[HourlyObservation]) -> PolarsResult<DataFrame> {
    let mut columns = Vec::with_capacity(COLUMNS.len());
    columns.push(Column::new(
        COL_CITY.into(),
        observations.iter().map(|o| o.city.as_str()).collect::<Vec<_>>(),
    ));
    columns.push(Column::new(
        COL_DATE_TIME.into(),
        observations
            .iter()
            .map(|o| o.timestamp.format(DATE_TIME_FORMAT).to_string())
            .collect::<Vec<_>>(),
    ));
    for (name, field) in MEASUREMENT_COLUMNS {
        columns.push(Column::new(
            name.into(),
            observations.iter().map(field).collect::<Vec<f64>>(),
        ));
    }
    columns.push(Column::new(
        COL_UV_INDEX.into(),
        observations
            .iter()
            .map(|o| o.uv_index.value())
            .collect::<Vec<Option<f64>>>(),
    ));
    columns.push(Column::new(
        COL_CONDITION.into(),
        observations
            .iter()
            .map(|o| o.condition.as_str())
            .collect::<Vec<_>>(),
    ));
    DataFrame::new(columns)
}

/// Writes `observations` to `path`, replacing any existing file.
pub fn write_observations(
    path: &Path,
    observations: &[HourlyObservation],
    format: DatasetFormat,
) -> Result<(), DatasetError> {
    let polars_err = |e| DatasetError::Polars(path.to_path_buf(), e);
    let mut df = to_frame(observations).map_err(polars_err)?;
    let mut file = File::create(path).map_err(|e| DatasetError::Io(path.to_path_buf(), e))?;

    match format {
        DatasetFormat::Csv => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(polars_err)?,
        DatasetFormat::Parquet => {
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(polars_err)?;
        }
    }
    info!(
        "Wrote {} observations to {} as {:?}",
        observations.len(),
        path.display(),
        format
    );
    Ok(())
}

/// Reads every observation stored in `path`.
pub fn read_observations(path: &Path) -> Result<Vec<HourlyObservation>, DatasetError> {
    let df = read_frame(path)?;
    from_frame(&df, path)
}

/// Reads the observations of `city` on `date` from `path`, in file order.
pub fn read_day(
    path: &Path,
    city: &str,
    date: NaiveDate,
) -> Result<Vec<HourlyObservation>, DatasetError> {
    let df = read_frame(path)?
        .lazy()
        .filter(col(COL_CITY).eq(lit(city)))
        .collect()
        .map_err(|e| DatasetError::Polars(path.to_path_buf(), e))?;
    let mut observations = from_frame(&df, path)?;
    observations.retain(|o| o.timestamp.date() == date);
    Ok(observations)
}

fn read_frame(path: &Path) -> Result<DataFrame, DatasetError> {
    let polars_err = |e| DatasetError::Polars(path.to_path_buf(), e);
    match DatasetFormat::from_path(path) {
        DatasetFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(polars_err)?
            .finish()
            .map_err(polars_err),
        DatasetFormat::Parquet => {
            let file = File::open(path).map_err(|e| DatasetError::Io(path.to_path_buf(), e))?;
            ParquetReader::new(file).finish().map_err(polars_err)
        }
    }
}

fn from_frame(df: &DataFrame, path: &Path) -> Result<Vec<HourlyObservation>, DatasetError> {
    let polars_err = |e| DatasetError::Polars(path.to_path_buf(), e);
    let cast_column = |name: &str, dtype: DataType| -> Result<Column, DatasetError> {
        df.column(name)
            .and_then(|c| c.cast(&dtype))
            .map_err(polars_err)
    };

    let city = cast_column(COL_CITY, DataType::String)?;
    let date_time = cast_column(COL_DATE_TIME, DataType::String)?;
    let condition = cast_column(COL_CONDITION, DataType::String)?;
    let uv = cast_column(COL_UV_INDEX, DataType::Float64)?;
    let mut measurements = Vec::with_capacity(MEASUREMENT_COLUMNS.len());
    for (name, _) in MEASUREMENT_COLUMNS {
        measurements.push((name, cast_column(name, DataType::Float64)?));
    }

    let city = city.str().map_err(polars_err)?;
    let date_time = date_time.str().map_err(polars_err)?;
    let condition = condition.str().map_err(polars_err)?;
    let uv = uv.f64().map_err(polars_err)?;
    let measurements = measurements
        .iter()
        .map(|(name, c)| c.f64().map(|ca| (*name, ca)))
        .collect::<PolarsResult<Vec<_>>>()
        .map_err(polars_err)?;

    let missing = |column: &'static str, row: usize| DatasetError::MissingValue {
        path: path.to_path_buf(),
        column,
        row,
    };

    (0..df.height())
        .map(|row| -> Result<HourlyObservation, DatasetError> {
            let measurement = |i: usize| -> Result<f64, DatasetError> {
                let (name, ca) = measurements[i];
                ca.get(row).ok_or_else(|| missing(name, row))
            };
            let raw_time = date_time
                .get(row)
                .ok_or_else(|| missing(COL_DATE_TIME, row))?;
            let timestamp = NaiveDateTime::parse_from_str(raw_time, DATE_TIME_FORMAT).map_err(
                |source| DatasetError::TimestampParse {
                    path: path.to_path_buf(),
                    value: raw_time.to_string(),
                    source,
                },
            )?;
            Ok(HourlyObservation {
                city: city
                    .get(row)
                    .ok_or_else(|| missing(COL_CITY, row))?
                    .to_string(),
                timestamp,
                temp_c: measurement(0)?,
                humidity: measurement(1)?,
                wind_kmph: measurement(2)?,
                precip_mm: measurement(3)?,
                atmospheric_pressure: measurement(4)?,
                visibility: measurement(5)?,
                dew_point: measurement(6)?,
                wind_gust: measurement(7)?,
                cloud_cover_pct: measurement(8)?,
                uv_index: UvIndex::from(uv.get(row)),
                condition: condition
                    .get(row)
                    .ok_or_else(|| missing(COL_CONDITION, row))?
                    .to_string(),
            })
        })
        .collect()
}
