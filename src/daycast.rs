//! The main entry point: fetches a city's hourly weather and runs the forecast
//! pipeline on it.

use crate::cities::registry::CityRegistry;
use crate::classifier::ConditionClassifier;
use crate::error::DaycastError;
use crate::pipeline::forecast::ForecastPipeline;
use crate::pipeline::result::ForecastResult;
use crate::types::observation::HourlyObservation;
use crate::weather_api::client::WeatherApiClient;
use crate::weather_api::config::WeatherApiConfig;
use bon::bon;
use chrono::{Days, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

/// Number of selectable forecast days, today included.
pub const DEFAULT_UPCOMING_DAYS: u64 = 8;

/// Returns `count` consecutive dates starting at `today`.
///
/// These are the dates a caller is offered when picking a forecast day.
///
/// ```
/// use chrono::NaiveDate;
/// use daycast::upcoming_dates;
///
/// let today = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();
/// let dates = upcoming_dates(today, 3);
/// assert_eq!(dates.last(), NaiveDate::from_ymd_opt(2024, 1, 1).as_ref());
/// ```
pub fn upcoming_dates(today: NaiveDate, count: u64) -> Vec<NaiveDate> {
    (0..count)
        .map_while(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// Client that forecasts the weather conditions of a day in one of the supported cities.
///
/// It owns the weather data client, whose in-memory cache is shared by every call,
/// and the [`ForecastPipeline`] wrapping the caller's classifier.
///
/// # Examples
///
/// ```rust,no_run
/// # use daycast::{ClassifierError, Daycast, DaycastError, FeatureMatrix, WeatherApiConfig};
/// # use chrono::NaiveDate;
/// # use std::sync::Arc;
/// # #[tokio::main]
/// # async fn main() -> Result<(), DaycastError> {
/// let classifier =
///     |m: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> { Ok(vec![0; m.len()]) };
/// let client = Daycast::builder()
///     .classifier(Arc::new(classifier))
///     .config(WeatherApiConfig::from_env()?)
///     .build()?;
///
/// let result = client
///     .forecast()
///     .city("Lagos")
///     .date(NaiveDate::from_ymd_opt(2023, 5, 12).unwrap())
///     .call()
///     .await?;
/// for section in &result.sections {
///     println!("{}", section);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Daycast {
    weather: WeatherApiClient,
    pipeline: ForecastPipeline,
}

#[bon]
impl Daycast {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.classifier(Arc<dyn ConditionClassifier>)`: **Required.** The pre-trained model.
    /// * `.config(WeatherApiConfig)`: **Required.** Weather provider settings.
    /// * `.registry(CityRegistry)`: Optional. Defaults to the built-in registry.
    ///
    /// # Errors
    ///
    /// Returns [`DaycastError::WeatherApi`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        classifier: Arc<dyn ConditionClassifier>,
        config: WeatherApiConfig,
        registry: Option<CityRegistry>,
    ) -> Result<Self, DaycastError> {
        Ok(Self {
            weather: WeatherApiClient::new(config)?,
            pipeline: ForecastPipeline::builder()
                .classifier(classifier)
                .maybe_registry(registry)
                .build(),
        })
    }

    pub fn registry(&self) -> &CityRegistry {
        self.pipeline.registry()
    }

    pub fn pipeline(&self) -> &ForecastPipeline {
        &self.pipeline
    }

    /// Forecasts one day in one city.
    ///
    /// # Arguments
    ///
    /// * `.city(&str)`: **Required.** City name, matched case-insensitively.
    /// * `.date(NaiveDate)`: **Required.** The day to forecast.
    ///
    /// # Errors
    ///
    /// Returns [`DaycastError::Registry`] for an unknown city before anything is
    /// fetched, [`DaycastError::WeatherApi`] if the day cannot be fetched, and
    /// [`DaycastError::Forecast`] if the pipeline fails.
    #[builder]
    pub async fn forecast(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<ForecastResult, DaycastError> {
        let city = self.registry().resolve(city)?;
        let observations = self.weather.hourly(&city, date).await?;
        Ok(self.pipeline.run(city.name, date, &observations)?)
    }

    /// Forecasts several days in one city, one independent pipeline run per date.
    ///
    /// Returns one `(date, result)` pair per entry of `dates`, in the same order. A
    /// date that cannot be fetched or forecast gets its own error and does not stop
    /// the others.
    ///
    /// # Arguments
    ///
    /// * `.city(&str)`: **Required.** City name, matched case-insensitively.
    /// * `.dates(&[NaiveDate])`: **Required.** Days to forecast.
    ///
    /// # Errors
    ///
    /// Returns [`DaycastError::Registry`] for an unknown city, before any date is
    /// fetched.
    #[builder]
    pub async fn forecast_dates(
        &self,
        city: &str,
        dates: &[NaiveDate],
    ) -> Result<Vec<(NaiveDate, Result<ForecastResult, DaycastError>)>, DaycastError> {
        let city = self.registry().resolve(city)?;
        let mut results = Vec::with_capacity(dates.len());
        for &date in dates {
            let result = match self.weather.hourly(&city, date).await {
                Ok(observations) => self
                    .pipeline
                    .run(city.name, date, &observations)
                    .map_err(DaycastError::from),
                Err(e) => Err(DaycastError::from(e)),
            };
            if let Err(e) = &result {
                warn!("Forecast for {} on {} failed: {}", city.name, date, e);
            }
            results.push((date, result));
        }
        Ok(results)
    }

    /// Fetches the hourly observations of `city` for every day from `start` to `end`
    /// inclusive, ready for [`crate::dataset::write_observations`].
    ///
    /// # Errors
    ///
    /// Returns [`DaycastError::InvalidRange`] if `start` is after `end`.
    pub async fn collect_history(
        &self,
        city: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyObservation>, DaycastError> {
        if start > end {
            return Err(DaycastError::InvalidRange { start, end });
        }
        let city = self.registry().resolve(city)?;

        let mut observations = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            observations.extend(self.weather.hourly(&city, date).await?);
        }
        info!(
            "Collected {} observations for {} from {} to {}",
            observations.len(),
            city.name,
            start,
            end
        );
        Ok(observations)
    }
}
