//! Turns raw hourly observations into classifier-ready feature vectors.
//!
//! Encoding happens in three steps: calendar decomposition of the local timestamp,
//! sine/cosine encoding of hour and month, and z-score scaling of the continuous
//! measurements.
//!
//! # Scaling is fitted per batch
//!
//! Mean and standard deviation are computed over the batch being encoded, not taken
//! from the classifier's training set. A day with little variation in a field will
//! therefore amplify small differences in it. This matches how the classifier has
//! been served so far and is kept as is; see [`ScalingStats`] to inspect the fitted
//! statistics.

use crate::features::error::FeatureError;
use crate::features::schema::ContinuousField;
use crate::features::vector::{FeatureRow, FeatureVector};
use crate::types::observation::HourlyObservation;
use chrono::{Datelike, Timelike};
use log::debug;
use std::f64::consts::PI;

/// Returns `(sin, cos)` of `value` on a cycle of length `period`.
///
/// ```
/// use daycast::cyclical;
///
/// let (sin, cos) = cyclical(6.0, 24.0);
/// assert!((sin - 1.0).abs() < 1e-12);
/// assert!(cos.abs() < 1e-12);
/// ```
pub fn cyclical(value: f64, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * value / period;
    (angle.sin(), angle.cos())
}

/// Population mean and standard deviation of each continuous field over a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingStats {
    pub means: [f64; ContinuousField::COUNT],
    pub std_devs: [f64; ContinuousField::COUNT],
}

impl ScalingStats {
    /// Fits the statistics on `observations`.
    ///
    /// Unknown UV values are left out of the UV statistics. If no UV value is known,
    /// the UV mean is 0 and its standard deviation 0.
    pub fn fit(observations: &[HourlyObservation]) -> Result<Self, FeatureError> {
        if observations.is_empty() {
            return Err(FeatureError::EmptyBatch);
        }

        let mut means = [0.0; ContinuousField::COUNT];
        let mut std_devs = [0.0; ContinuousField::COUNT];

        for field in ContinuousField::ALL {
            let values: Vec<f64> = observations.iter().filter_map(|o| field.raw(o)).collect();
            if values.is_empty() {
                continue;
            }
            if values.iter().all(|v| *v == values[0]) {
                // Exact, so a constant field scales to 0 without rounding noise.
                means[field.index()] = values[0];
                continue;
            }
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            means[field.index()] = mean;
            std_devs[field.index()] = variance.sqrt();
        }

        Ok(Self { means, std_devs })
    }

    /// Scales one observation's continuous fields.
    ///
    /// A field with zero standard deviation scales to exactly 0, and so does an
    /// unknown UV index (it is imputed with the batch mean).
    pub fn transform(&self, observation: &HourlyObservation) -> [f64; ContinuousField::COUNT] {
        let mut scaled = [0.0; ContinuousField::COUNT];
        for field in ContinuousField::ALL {
            let idx = field.index();
            let std_dev = self.std_devs[idx];
            scaled[idx] = match field.raw(observation) {
                Some(value) if std_dev > 0.0 => (value - self.means[idx]) / std_dev,
                _ => 0.0,
            };
        }
        scaled
    }
}

/// Encodes batches of [`HourlyObservation`]s into [`FeatureVector`]s.
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Encodes `observations` for a city with categorical code `city_code`.
    ///
    /// The output has one vector per observation, in input order. Observations are
    /// not modified.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::EmptyBatch`] if `observations` is empty.
    pub fn encode(
        observations: &[HourlyObservation],
        city_code: u32,
    ) -> Result<Vec<FeatureVector>, FeatureError> {
        let stats = ScalingStats::fit(observations)?;
        debug!(
            "Fitted scaling statistics on {} observations: means {:?}, std devs {:?}",
            observations.len(),
            stats.means,
            stats.std_devs
        );

        Ok(observations
            .iter()
            .map(|observation| Self::encode_one(observation, city_code, &stats))
            .collect())
    }

    fn encode_one(
        observation: &HourlyObservation,
        city_code: u32,
        stats: &ScalingStats,
    ) -> FeatureVector {
        let timestamp = observation.timestamp;
        let month = timestamp.month();
        let hour = timestamp.hour();
        let (month_sin, month_cos) = cyclical(f64::from(month), 12.0);
        let (hour_sin, hour_cos) = cyclical(f64::from(hour), 24.0);

        FeatureVector {
            timestamp,
            year: timestamp.year(),
            month,
            day: timestamp.day(),
            hour,
            row: FeatureRow {
                continuous: stats.transform(observation),
                city_code,
                hour: f64::from(hour),
                hour_sin,
                hour_cos,
                month_sin,
                month_cos,
            },
        }
    }
}
