use crate::cities::error::RegistryError;
use crate::dataset::error::DatasetError;
use crate::pipeline::error::ForecastError;
use crate::weather_api::error::WeatherApiError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaycastError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    WeatherApi(#[from] WeatherApiError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("History range starts at {start}, after its end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}
