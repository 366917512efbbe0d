use crate::cities::registry::City;
use crate::types::observation::HourlyObservation;
use crate::weather_api::config::WeatherApiConfig;
use crate::weather_api::error::WeatherApiError;
use crate::weather_api::response::parse_day;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use log::{info, warn};
use reqwest::Client;
use std::collections::{hash_map::Entry, HashMap};
use std::time::Instant;
use tokio::sync::Mutex;

/// UTC offset of West Africa Time, the civil time of every registered city. It has
/// no daylight saving.
const WAT_OFFSET_HOURS: i64 = 1;

/// Calendar date in the registered cities (West Africa Time) at `instant`.
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use daycast::city_date;
///
/// let late_evening_utc = Utc.with_ymd_and_hms(2023, 5, 12, 23, 30, 0).unwrap();
/// assert_eq!(city_date(late_evening_utc), NaiveDate::from_ymd_opt(2023, 5, 13).unwrap());
/// ```
pub fn city_date(instant: DateTime<Utc>) -> NaiveDate {
    (instant + TimeDelta::hours(WAT_OFFSET_HOURS)).date_naive()
}

/// Today's date in the registered cities, whatever the host's time zone.
pub fn city_today() -> NaiveDate {
    city_date(Utc::now())
}

struct CachedDay {
    observations: Vec<HourlyObservation>,
    fetched_at: Instant,
    from_forecast: bool,
}

/// Fetches a day of hourly observations per city from the weather provider.
///
/// Past dates (in West Africa Time) are read from the provider's history endpoint,
/// today and later from its forecast endpoint. Fetched days are kept in memory, so
/// asking twice for the same city and date costs one request. Past days are kept
/// for the lifetime of the client; forecast days are refetched once they are older
/// than [`WeatherApiConfig::forecast_ttl`].
pub struct WeatherApiClient {
    config: WeatherApiConfig,
    http: Client,
    day_cache: Mutex<HashMap<(&'static str, NaiveDate), CachedDay>>,
}

impl WeatherApiClient {
    pub fn new(config: WeatherApiConfig) -> Result<Self, WeatherApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("daycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(WeatherApiError::ClientBuild)?;
        Ok(Self {
            config,
            http,
            day_cache: Mutex::new(HashMap::new()),
        })
    }

    /// Hourly observations of `city` on `date`, from cache when possible.
    pub async fn hourly(
        &self,
        city: &City,
        date: NaiveDate,
    ) -> Result<Vec<HourlyObservation>, WeatherApiError> {
        let key = (city.name, date);

        {
            let cache = self.day_cache.lock().await;
            if let Some(cached) = cache.get(&key).filter(|c| self.is_fresh(c)) {
                info!("Cache hit for {} on {}", city.name, date);
                return Ok(cached.observations.clone());
            }
        }
        warn!("Cache miss for {} on {}. Fetching.", city.name, date);

        let endpoint = endpoint_for(date, city_today());
        let observations = self.fetch_day(city, date, endpoint).await?;
        let fetched = CachedDay {
            observations: observations.clone(),
            fetched_at: Instant::now(),
            from_forecast: endpoint == FORECAST_ENDPOINT,
        };

        let mut cache = self.day_cache.lock().await;
        match cache.entry(key) {
            // Another task fetched the same day while we were waiting on the network.
            Entry::Occupied(entry) if self.is_fresh(entry.get()) => {
                Ok(entry.get().observations.clone())
            }
            Entry::Occupied(mut entry) => {
                entry.insert(fetched);
                Ok(observations)
            }
            Entry::Vacant(entry) => {
                entry.insert(fetched);
                Ok(observations)
            }
        }
    }

    fn is_fresh(&self, cached: &CachedDay) -> bool {
        !cached.from_forecast || cached.fetched_at.elapsed() < self.config.forecast_ttl
    }

    /// Seeds the cache with a past day, as if it had been fetched.
    #[cfg(test)]
    pub(crate) async fn insert_cached(
        &self,
        city: &City,
        date: NaiveDate,
        observations: Vec<HourlyObservation>,
    ) {
        self.day_cache.lock().await.insert(
            (city.name, date),
            CachedDay {
                observations,
                fetched_at: Instant::now(),
                from_forecast: false,
            },
        );
    }

    async fn fetch_day(
        &self,
        city: &City,
        date: NaiveDate,
        endpoint: &str,
    ) -> Result<Vec<HourlyObservation>, WeatherApiError> {
        // Logged and reported without the query string, which carries the API key.
        let url = format!("{}/{}", self.config.base_url, endpoint);
        info!("Requesting {} data for {} on {}", endpoint, city.name, date);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.config.api_key.clone()),
                ("q", format!("{},{}", city.location.0, city.location.1)),
                ("dt", date.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e.status());
                return Err(if let Some(status) = e.status() {
                    WeatherApiError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WeatherApiError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(url.clone(), e))?;
        parse_day(&body, city.name, date)
    }
}

const HISTORY_ENDPOINT: &str = "history.json";
const FORECAST_ENDPOINT: &str = "forecast.json";

/// Provider endpoint serving `date`, seen from `today`.
fn endpoint_for(date: NaiveDate, today: NaiveDate) -> &'static str {
    if date < today {
        HISTORY_ENDPOINT
    } else {
        FORECAST_ENDPOINT
    }
}
