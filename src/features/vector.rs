use crate::features::schema::{ContinuousField, MODEL_COLUMNS};
use chrono::NaiveDateTime;

/// The numeric part of a feature vector: everything that can be averaged and
/// everything the classifier sees.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Scaled continuous measurements, indexed by [`ContinuousField::index`].
    pub continuous: [f64; ContinuousField::COUNT],
    pub city_code: u32,
    /// Local hour. Fractional once rows are averaged.
    pub hour: f64,
    pub hour_sin: f64,
    pub hour_cos: f64,
    pub month_sin: f64,
    pub month_cos: f64,
}

impl FeatureRow {
    pub fn get(&self, field: ContinuousField) -> f64 {
        self.continuous[field.index()]
    }

    /// Flattens the row in [`MODEL_COLUMNS`] order.
    pub fn to_model_row(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(MODEL_COLUMNS.len());
        row.extend_from_slice(&self.continuous);
        row.push(f64::from(self.city_code));
        row.push(self.hour);
        row.push(self.hour_sin);
        row.push(self.hour_cos);
        row
    }

    /// Element-wise arithmetic mean of `rows`. The city code is taken from the first
    /// row, since all rows of one batch share it. Returns `None` for no rows.
    pub fn mean<'a>(rows: impl IntoIterator<Item = &'a FeatureRow>) -> Option<FeatureRow> {
        let mut rows = rows.into_iter();
        let first = rows.next()?;
        let mut sum = first.clone();
        let mut count = 1usize;

        for row in rows {
            for (acc, value) in sum.continuous.iter_mut().zip(row.continuous.iter()) {
                *acc += value;
            }
            sum.hour += row.hour;
            sum.hour_sin += row.hour_sin;
            sum.hour_cos += row.hour_cos;
            sum.month_sin += row.month_sin;
            sum.month_cos += row.month_cos;
            count += 1;
        }

        let n = count as f64;
        sum.continuous.iter_mut().for_each(|v| *v /= n);
        sum.hour /= n;
        sum.hour_sin /= n;
        sum.hour_cos /= n;
        sum.month_sin /= n;
        sum.month_cos /= n;
        Some(sum)
    }
}

/// Features derived from a single [`crate::HourlyObservation`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub timestamp: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub row: FeatureRow,
}
