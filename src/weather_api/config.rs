use crate::weather_api::error::WeatherApiError;
use bon::bon;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_FORECAST_TTL: Duration = Duration::from_secs(30 * 60);

const API_KEY_ENV: &str = "WEATHER_API_KEY";
const BASE_URL_ENV: &str = "WEATHER_API_BASE_URL";

/// Connection settings for the weather provider.
#[derive(Debug, Clone)]
pub struct WeatherApiConfig {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) timeout: Duration,
    pub(crate) forecast_ttl: Duration,
}

#[bon]
impl WeatherApiConfig {
    /// # Arguments
    ///
    /// * `.api_key(impl Into<String>)`: **Required.** Provider API key.
    /// * `.base_url(String)`: Optional. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Per-request timeout, defaults to [`DEFAULT_TIMEOUT`].
    /// * `.forecast_ttl(Duration)`: Optional. How long a cached forecast day is served
    ///   before it is fetched again, defaults to [`DEFAULT_FORECAST_TTL`]. Past days
    ///   never expire.
    ///
    /// ```
    /// use daycast::WeatherApiConfig;
    /// use std::time::Duration;
    ///
    /// let config = WeatherApiConfig::builder()
    ///     .api_key("secret")
    ///     .timeout(Duration::from_secs(5))
    ///     .build();
    /// assert_eq!(config.base_url(), "https://api.weatherapi.com/v1");
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        base_url: Option<String>,
        timeout: Option<Duration>,
        forecast_ttl: Option<Duration>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            forecast_ttl: forecast_ttl.unwrap_or(DEFAULT_FORECAST_TTL),
        }
    }

    /// Reads `WEATHER_API_KEY` and, if set, `WEATHER_API_BASE_URL`.
    pub fn from_env() -> Result<Self, WeatherApiError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| WeatherApiError::MissingApiKey(API_KEY_ENV))?;
        let base_url = std::env::var(BASE_URL_ENV).ok();
        Ok(Self::builder()
            .api_key(api_key)
            .maybe_base_url(base_url)
            .build())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn forecast_ttl(&self) -> Duration {
        self.forecast_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WeatherApiConfig::builder().api_key("k").build();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.forecast_ttl(), DEFAULT_FORECAST_TTL);
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let config = WeatherApiConfig::builder()
            .api_key("k")
            .base_url("http://localhost:8080/v1/".to_string())
            .build();
        assert_eq!(config.base_url(), "http://localhost:8080/v1");
    }
}
