//! Wire types of the weather provider and their mapping to [`HourlyObservation`]s.

use crate::types::observation::{HourlyObservation, UvIndex};
use crate::weather_api::error::WeatherApiError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

const HOUR_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    forecast: ApiForecast,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    #[serde(default)]
    forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastDay {
    date: NaiveDate,
    #[serde(default)]
    day: Option<ApiDay>,
    #[serde(default)]
    hour: Vec<ApiHour>,
}

#[derive(Debug, Deserialize)]
struct ApiDay {
    #[serde(default)]
    uv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiHour {
    time: String,
    temp_c: f64,
    humidity: f64,
    wind_kph: f64,
    precip_mm: f64,
    pressure_mb: f64,
    vis_km: f64,
    dewpoint_c: f64,
    cloud: f64,
    #[serde(default)]
    uv: Option<f64>,
    condition: ApiCondition,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
}

/// Parses a provider response body into the observations of `city` on `date`.
///
/// Wind gust is filled from the wind speed (`wind_kph`), which is how the
/// classifier's training data was collected. The UV index falls back to the
/// day's value when an hour has none, and is unknown if neither is present.
pub fn parse_day(
    body: &[u8],
    city: &str,
    date: NaiveDate,
) -> Result<Vec<HourlyObservation>, WeatherApiError> {
    let response: ApiResponse =
        serde_json::from_slice(body).map_err(|source| WeatherApiError::JsonParse {
            city: city.to_string(),
            date,
            source,
        })?;

    let day = response
        .forecast
        .forecastday
        .into_iter()
        .find(|d| d.date == date)
        .filter(|d| !d.hour.is_empty())
        .ok_or_else(|| WeatherApiError::MissingDay {
            city: city.to_string(),
            date,
        })?;
    let day_uv = day.day.and_then(|d| d.uv);

    day.hour
        .into_iter()
        .map(|hour| -> Result<HourlyObservation, WeatherApiError> {
            let timestamp = NaiveDateTime::parse_from_str(&hour.time, HOUR_FORMAT).map_err(
                |source| WeatherApiError::TimestampParse {
                    city: city.to_string(),
                    value: hour.time.clone(),
                    source,
                },
            )?;
            Ok(HourlyObservation {
                city: city.to_string(),
                timestamp,
                temp_c: hour.temp_c,
                humidity: hour.humidity,
                wind_kmph: hour.wind_kph,
                precip_mm: hour.precip_mm,
                atmospheric_pressure: hour.pressure_mb,
                visibility: hour.vis_km,
                dew_point: hour.dewpoint_c,
                wind_gust: hour.wind_kph,
                cloud_cover_pct: hour.cloud,
                uv_index: UvIndex::from(hour.uv.or(day_uv)),
                condition: hour.condition.text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 12).unwrap()
    }

    const BODY: &str = r#"{
        "location": { "name": "Lagos", "localtime": "2023-05-12 9:30" },
        "forecast": {
            "forecastday": [{
                "date": "2023-05-12",
                "day": { "maxtemp_c": 31.2, "uv": 6.0 },
                "hour": [
                    {
                        "time": "2023-05-12 00:00", "temp_c": 26.1, "humidity": 88,
                        "wind_kph": 9.4, "gust_kph": 14.0, "precip_mm": 0.0,
                        "pressure_mb": 1011.0, "vis_km": 10.0, "dewpoint_c": 23.9,
                        "cloud": 35, "uv": 1.0, "condition": { "text": "Partly cloudy", "code": 1003 }
                    },
                    {
                        "time": "2023-05-12 01:00", "temp_c": 25.8, "humidity": 90,
                        "wind_kph": 8.6, "precip_mm": 0.1,
                        "pressure_mb": 1011.0, "vis_km": 9.0, "dewpoint_c": 23.7,
                        "cloud": 60, "condition": { "text": "Patchy rain possible" }
                    }
                ]
            }]
        }
    }"#;

    #[test]
    fn test_parse_day_maps_fields() {
        let observations = parse_day(BODY.as_bytes(), "Lagos", date()).unwrap();
        assert_eq!(observations.len(), 2);

        let first = &observations[0];
        assert_eq!(first.city, "Lagos");
        assert_eq!(first.timestamp.hour(), 0);
        assert_eq!(first.temp_c, 26.1);
        assert_eq!(first.humidity, 88.0);
        assert_eq!(first.atmospheric_pressure, 1011.0);
        assert_eq!(first.cloud_cover_pct, 35.0);
        assert_eq!(first.uv_index, UvIndex::Known(1.0));
        assert_eq!(first.condition, "Partly cloudy");
        // Gust mirrors wind speed, not gust_kph.
        assert_eq!(first.wind_gust, 9.4);
    }

    #[test]
    fn test_missing_hour_uv_falls_back_to_day() {
        let observations = parse_day(BODY.as_bytes(), "Lagos", date()).unwrap();
        assert_eq!(observations[1].uv_index, UvIndex::Known(6.0));
    }

    #[test]
    fn test_other_date_is_missing_day() {
        let other = NaiveDate::from_ymd_opt(2023, 5, 13).unwrap();
        let err = parse_day(BODY.as_bytes(), "Lagos", other).unwrap_err();
        assert!(matches!(err, WeatherApiError::MissingDay { .. }));
    }

    #[test]
    fn test_malformed_body() {
        let err = parse_day(b"{\"forecast\": 3}", "Lagos", date()).unwrap_err();
        assert!(matches!(err, WeatherApiError::JsonParse { .. }));
    }

    #[test]
    fn test_bad_timestamp() {
        let body = BODY.replace("2023-05-12 01:00", "yesterday");
        let err = parse_day(body.as_bytes(), "Lagos", date()).unwrap_err();
        assert!(matches!(
            err,
            WeatherApiError::TimestampParse { ref value, .. } if value == "yesterday"
        ));
    }
}
