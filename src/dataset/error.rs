use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error on dataset file {0}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Polars error on dataset file {0}")]
    Polars(PathBuf, #[source] PolarsError),

    #[error("Column '{column}' in {path} has no value at row {row}")]
    MissingValue {
        path: PathBuf,
        column: &'static str,
        row: usize,
    },

    #[error("Unparseable date_time '{value}' in {path}")]
    TimestampParse {
        path: PathBuf,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
