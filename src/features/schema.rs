//! Column layout of the feature rows handed to the condition classifier.

use crate::types::observation::HourlyObservation;

/// The continuous measurements that are z-score scaled before prediction,
/// declared in the order they appear in a model row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContinuousField {
    AtmosphericPressure,
    CloudCover,
    DewPoint,
    UvIndex,
    Visibility,
    WindGust,
    Humidity,
    Precipitation,
    Temperature,
    WindSpeed,
}

impl ContinuousField {
    pub const COUNT: usize = 10;

    pub const ALL: [ContinuousField; Self::COUNT] = [
        ContinuousField::AtmosphericPressure,
        ContinuousField::CloudCover,
        ContinuousField::DewPoint,
        ContinuousField::UvIndex,
        ContinuousField::Visibility,
        ContinuousField::WindGust,
        ContinuousField::Humidity,
        ContinuousField::Precipitation,
        ContinuousField::Temperature,
        ContinuousField::WindSpeed,
    ];

    /// Position of the field in [`ContinuousField::ALL`] and in a model row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used in the classifier's training data.
    pub fn column_name(self) -> &'static str {
        MODEL_COLUMNS[self.index()]
    }

    /// Raw value of this field in an observation. `None` only for an unknown UV index.
    pub fn raw(self, observation: &HourlyObservation) -> Option<f64> {
        match self {
            ContinuousField::AtmosphericPressure => Some(observation.atmospheric_pressure),
            ContinuousField::CloudCover => Some(observation.cloud_cover_pct),
            ContinuousField::DewPoint => Some(observation.dew_point),
            ContinuousField::UvIndex => observation.uv_index.value(),
            ContinuousField::Visibility => Some(observation.visibility),
            ContinuousField::WindGust => Some(observation.wind_gust),
            ContinuousField::Humidity => Some(observation.humidity),
            ContinuousField::Precipitation => Some(observation.precip_mm),
            ContinuousField::Temperature => Some(observation.temp_c),
            ContinuousField::WindSpeed => Some(observation.wind_kmph),
        }
    }
}

/// Column order of every row passed to [`crate::ConditionClassifier::predict`].
///
/// Ten scaled continuous measurements, then the city code, the local hour and its
/// cyclical encoding. A classifier trained on a different layout is a
/// configuration error.
pub const MODEL_COLUMNS: [&str; 14] = [
    "Atmospheric Pressure",
    "Cloud Cover (%)",
    "Dew Point",
    "UV Index",
    "Visibility",
    "Wind Gust",
    "humidity",
    "precip_mm",
    "temp_c",
    "wind_kmph",
    "city_encoded",
    "hour",
    "hour_sin",
    "hour_cos",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous_fields_lead_the_model_row() {
        for (idx, field) in ContinuousField::ALL.iter().enumerate() {
            assert_eq!(field.index(), idx);
        }
        assert_eq!(ContinuousField::UvIndex.column_name(), "UV Index");
        assert_eq!(ContinuousField::WindSpeed.column_name(), "wind_kmph");
    }
}
