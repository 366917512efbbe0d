use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("Environment variable {0} is not set")]
    MissingApiKey(&'static str),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse weather response for {city} on {date}")]
    JsonParse {
        city: String,
        date: NaiveDate,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather response for {city} contains no data for {date}")]
    MissingDay { city: String, date: NaiveDate },

    #[error("Unparseable hour timestamp '{value}' in weather response for {city}")]
    TimestampParse {
        city: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
