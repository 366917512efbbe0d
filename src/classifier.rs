//! The seam to the pre-trained condition classifier.
//!
//! The classifier itself is not part of this crate. Anything that can turn a
//! [`FeatureMatrix`] into one integer label per row can be plugged into a
//! [`crate::ForecastPipeline`], including plain closures.

use crate::features::schema::MODEL_COLUMNS;
use crate::features::vector::FeatureRow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier expects columns {expected:?}, got {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

/// Rows of model features in [`MODEL_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a FeatureRow>) -> Self {
        Self {
            rows: rows.into_iter().map(FeatureRow::to_model_row).collect(),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &MODEL_COLUMNS
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks the matrix against the column layout a classifier was trained on.
    pub fn check_columns(&self, trained: &[&str]) -> Result<(), ClassifierError> {
        if trained == self.columns() {
            return Ok(());
        }
        Err(ClassifierError::SchemaMismatch {
            expected: trained.iter().map(|c| c.to_string()).collect(),
            found: self.columns().iter().map(|c| c.to_string()).collect(),
        })
    }
}

/// A multi-class weather-condition classifier.
///
/// `predict` must return exactly one label per row, in row order. Implementations
/// are shared across concurrent forecasts and must not rely on interior state
/// changing between calls.
pub trait ConditionClassifier: Send + Sync {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<i64>, ClassifierError>;
}

impl<F> ConditionClassifier for F
where
    F: Fn(&FeatureMatrix) -> Result<Vec<i64>, ClassifierError> + Send + Sync,
{
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<i64>, ClassifierError> {
        self(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::schema::ContinuousField;

    fn row(hour: f64) -> FeatureRow {
        FeatureRow {
            continuous: [0.0; ContinuousField::COUNT],
            city_code: 1,
            hour,
            hour_sin: 0.0,
            hour_cos: 1.0,
            month_sin: 0.0,
            month_cos: 1.0,
        }
    }

    #[test]
    fn test_matrix_keeps_row_order() {
        let rows = [row(0.0), row(1.0), row(2.0)];
        let matrix = FeatureMatrix::from_rows(&rows);
        assert_eq!(matrix.len(), 3);
        let hours: Vec<f64> = matrix.rows().iter().map(|r| r[11]).collect();
        assert_eq!(hours, [0.0, 1.0, 2.0]);
        assert!(matrix.rows().iter().all(|r| r.len() == matrix.columns().len()));
    }

    #[test]
    fn test_closures_are_classifiers() {
        let classifier =
            |m: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> { Ok(vec![4; m.len()]) };
        let matrix = FeatureMatrix::from_rows(&[row(3.0)]);
        assert_eq!(classifier.predict(&matrix).unwrap(), vec![4]);
    }

    #[test]
    fn test_check_columns() {
        let matrix = FeatureMatrix::from_rows(&[row(0.0)]);
        assert!(matrix.check_columns(&MODEL_COLUMNS).is_ok());
        let err = matrix.check_columns(&["temp_c", "hour"]).unwrap_err();
        assert!(matches!(err, ClassifierError::SchemaMismatch { .. }));
    }
}
