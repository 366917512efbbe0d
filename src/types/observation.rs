use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// UV index as reported upstream. Providers omit it for some hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UvIndex {
    Known(f64),
    Unknown,
}

impl UvIndex {
    pub fn value(self) -> Option<f64> {
        match self {
            UvIndex::Known(v) => Some(v),
            UvIndex::Unknown => None,
        }
    }
}

impl From<Option<f64>> for UvIndex {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => UvIndex::Known(v),
            _ => UvIndex::Unknown,
        }
    }
}

/// Parses a number, or any of the placeholders (`unknown`, `N/A`, empty) as `Unknown`.
impl FromStr for UvIndex {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.trim().parse::<f64>().ok().into())
    }
}

impl fmt::Display for UvIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvIndex::Known(v) => write!(f, "{v}"),
            UvIndex::Unknown => f.write_str("unknown"),
        }
    }
}

/// One hour of raw weather observations for a city.
///
/// `timestamp` is the local wall-clock time of the city; no timezone conversion
/// is applied anywhere downstream. `condition` is the condition reported by the
/// provider. It travels with the record but is never fed to the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyObservation {
    pub city: String,
    pub timestamp: NaiveDateTime,
    /// Air temperature in °C.
    pub temp_c: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Wind speed in km/h.
    pub wind_kmph: f64,
    /// Precipitation in mm.
    pub precip_mm: f64,
    /// Atmospheric pressure in mb.
    pub atmospheric_pressure: f64,
    /// Visibility in km.
    pub visibility: f64,
    /// Dew point in °C.
    pub dew_point: f64,
    /// Wind gust in km/h.
    pub wind_gust: f64,
    /// Cloud cover in %.
    pub cloud_cover_pct: f64,
    pub uv_index: UvIndex,
    pub condition: String,
}
