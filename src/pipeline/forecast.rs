//! The forecast pipeline: registry lookup, encoding, hourly prediction, section
//! aggregation and section prediction, in that order.

use crate::cities::registry::CityRegistry;
use crate::classifier::{ConditionClassifier, FeatureMatrix};
use crate::codec::ConditionCodec;
use crate::features::encoder::FeatureEncoder;
use crate::features::vector::FeatureRow;
use crate::pipeline::error::ForecastError;
use crate::pipeline::result::{ForecastResult, HourlyForecast, SectionForecast};
use crate::sections::aggregator::SectionAggregator;
use crate::types::condition::ConditionLabel;
use crate::types::observation::HourlyObservation;
use bon::bon;
use chrono::NaiveDate;
use log::{debug, warn};
use std::sync::Arc;

/// Produces hourly and day-section condition forecasts from a day of observations.
///
/// The pipeline is pure and synchronous: it holds a shared, read-only classifier and
/// the city registry, and every [`ForecastPipeline::run`] works only on the data it
/// is given. One pipeline can serve any number of threads at once.
///
/// # Examples
///
/// ```rust
/// use daycast::{ClassifierError, FeatureMatrix, ForecastPipeline};
/// use std::sync::Arc;
///
/// let always_clear =
///     |m: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> { Ok(vec![0; m.len()]) };
/// let pipeline = ForecastPipeline::builder()
///     .classifier(Arc::new(always_clear))
///     .build();
/// ```
pub struct ForecastPipeline {
    classifier: Arc<dyn ConditionClassifier>,
    registry: CityRegistry,
}

#[bon]
impl ForecastPipeline {
    /// Creates a pipeline around a classifier.
    ///
    /// # Arguments
    ///
    /// * `.classifier(Arc<dyn ConditionClassifier>)`: **Required.** The pre-trained model.
    /// * `.registry(CityRegistry)`: Optional. Defaults to the built-in registry.
    #[builder]
    pub fn new(classifier: Arc<dyn ConditionClassifier>, registry: Option<CityRegistry>) -> Self {
        Self {
            classifier,
            registry: registry.unwrap_or_default(),
        }
    }

    pub fn registry(&self) -> &CityRegistry {
        &self.registry
    }

    /// Forecasts `date` in `city_name` from that day's hourly `observations`.
    ///
    /// The classifier is called twice: once with every encoded hour, once with the
    /// four section averages. Section labels come from predicting on averaged
    /// features, not from averaging hourly labels.
    ///
    /// Observations dated on another day are used as given and only logged.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::Registry`] if the city is unknown. Nothing else runs.
    /// * [`ForecastError::Features`] if `observations` is empty.
    /// * [`ForecastError::Aggregate`] if a section of the day has no observations.
    /// * [`ForecastError::Classifier`] if the classifier fails.
    /// * [`ForecastError::PredictionCount`] if it returns the wrong number of labels.
    /// * [`ForecastError::Codec`] if it returns a label outside the trained range.
    pub fn run(
        &self,
        city_name: &str,
        date: NaiveDate,
        observations: &[HourlyObservation],
    ) -> Result<ForecastResult, ForecastError> {
        let city = self.registry.resolve(city_name)?;

        let off_date = observations
            .iter()
            .filter(|o| o.timestamp.date() != date)
            .count();
        if off_date > 0 {
            warn!(
                "{} of {} observations for {} are not dated {}",
                off_date,
                observations.len(),
                city.name,
                date
            );
        }

        let vectors = FeatureEncoder::encode(observations, city.code)?;

        let hourly_labels = self.predict(vectors.iter().map(|v| &v.row))?;
        let hourly = vectors
            .iter()
            .zip(observations)
            .zip(hourly_labels)
            .map(|((vector, observation), condition)| HourlyForecast {
                timestamp: vector.timestamp,
                hour: vector.hour,
                condition,
                observed: observation.condition.clone(),
            })
            .collect();

        let sections = SectionAggregator::aggregate(&vectors)?;
        let section_labels = self.predict(sections.values().map(|s| &s.row))?;
        let sections = sections
            .values()
            .zip(section_labels)
            .map(|(aggregate, condition)| SectionForecast {
                section: aggregate.section,
                member_hours: aggregate.member_hours,
                condition,
            })
            .collect();

        debug!(
            "Forecast for {} on {} built from {} observations",
            city.name,
            date,
            observations.len()
        );

        Ok(ForecastResult {
            city: city.name.to_string(),
            date,
            hourly,
            sections,
        })
    }

    /// One classifier call for all `rows`, decoded.
    fn predict<'a>(
        &self,
        rows: impl IntoIterator<Item = &'a FeatureRow>,
    ) -> Result<Vec<ConditionLabel>, ForecastError> {
        let matrix = FeatureMatrix::from_rows(rows);
        let codes = self.classifier.predict(&matrix)?;
        if codes.len() != matrix.len() {
            return Err(ForecastError::PredictionCount {
                expected: matrix.len(),
                found: codes.len(),
            });
        }
        Ok(ConditionCodec::decode_all(&codes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::error::RegistryError;
    use crate::classifier::ClassifierError;
    use crate::codec::CodecError;
    use crate::features::error::FeatureError;
    use crate::features::schema::MODEL_COLUMNS;
    use crate::sections::error::AggregateError;
    use crate::types::day_section::DaySection;
    use crate::types::observation::UvIndex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 12).unwrap()
    }

    fn lagos_day(hours: impl IntoIterator<Item = u32>) -> Vec<HourlyObservation> {
        hours
            .into_iter()
            .map(|h| HourlyObservation {
                city: "Lagos".to_string(),
                timestamp: date().and_hms_opt(h, 0, 0).unwrap(),
                temp_c: 24.0 + f64::from(h % 12),
                humidity: 90.0 - f64::from(h),
                wind_kmph: 8.0 + f64::from(h % 5),
                precip_mm: if h > 15 { 0.4 } else { 0.0 },
                atmospheric_pressure: 1010.0,
                visibility: 10.0,
                dew_point: 23.0,
                wind_gust: 8.0 + f64::from(h % 5),
                cloud_cover_pct: f64::from(h * 4),
                uv_index: if h < 6 { UvIndex::Unknown } else { UvIndex::Known(5.0) },
                condition: "Partly cloudy".to_string(),
            })
            .collect()
    }

    /// Records every matrix it receives and answers with `label(row_index)`.
    struct Recorder<F> {
        label: F,
        calls: Mutex<Vec<FeatureMatrix>>,
    }

    impl<F: Fn(usize) -> i64 + Send + Sync> Recorder<F> {
        fn new(label: F) -> Arc<Self> {
            Arc::new(Self {
                label,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    impl<F: Fn(usize) -> i64 + Send + Sync> ConditionClassifier for Recorder<F> {
        fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<i64>, ClassifierError> {
            matrix.check_columns(&MODEL_COLUMNS)?;
            self.calls.lock().unwrap().push(matrix.clone());
            Ok((0..matrix.len()).map(&self.label).collect())
        }
    }

    fn pipeline(classifier: Arc<dyn ConditionClassifier>) -> ForecastPipeline {
        ForecastPipeline::builder().classifier(classifier).build()
    }

    #[test]
    fn test_all_clear_day() {
        let pipeline = pipeline(Arc::new(
            |m: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> { Ok(vec![0; m.len()]) },
        ));
        let result = pipeline.run("Lagos", date(), &lagos_day(0..24)).unwrap();

        assert_eq!(result.city, "Lagos");
        assert_eq!(result.hourly.len(), 24);
        assert!(result
            .hourly
            .iter()
            .all(|h| h.condition.name() == "Clear"));
        assert_eq!(result.sections.len(), 4);
        assert!(result
            .sections
            .iter()
            .all(|s| s.condition.name() == "Clear"));
        assert_eq!(
            result.sections.iter().map(|s| s.section).collect::<Vec<_>>(),
            DaySection::ALL.to_vec()
        );
    }

    #[test]
    fn test_hourly_labels_cycle_through_table() {
        let recorder = Recorder::new(|idx| (idx % 12) as i64);
        let pipeline = pipeline(recorder.clone());
        let result = pipeline.run("Lagos", date(), &lagos_day(0..24)).unwrap();

        for (idx, hourly) in result.hourly.iter().enumerate() {
            assert_eq!(hourly.hour, idx as u32);
            assert_eq!(hourly.condition, ConditionLabel::ALL[idx % 12]);
        }
        let sections: Vec<_> = result.sections.iter().map(|s| s.condition).collect();
        assert_eq!(sections, ConditionLabel::ALL[..4].to_vec());
    }

    #[test]
    fn test_classifier_called_once_per_stage() {
        let recorder = Recorder::new(|_| 8);
        let pipeline = pipeline(recorder.clone());
        pipeline.run("Lagos", date(), &lagos_day(0..24)).unwrap();

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 24);
        assert_eq!(calls[1].len(), 4);

        // Lagos is city code 3; section rows carry the mean hour of their members.
        assert!(calls[0].rows().iter().all(|r| r[10] == 3.0));
        let section_hours: Vec<f64> = calls[1].rows().iter().map(|r| r[11]).collect();
        assert_eq!(section_hours, [2.5, 8.5, 14.5, 20.5]);
    }

    #[test]
    fn test_unknown_city_fails_before_classifier() {
        let recorder = Recorder::new(|_| 0);
        let pipeline = pipeline(recorder.clone());
        let err = pipeline
            .run("Atlantis", date(), &lagos_day(0..24))
            .unwrap_err();

        assert!(matches!(
            err,
            ForecastError::Registry(RegistryError::UnknownCity(ref c)) if c == "Atlantis"
        ));
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let pipeline = pipeline(Recorder::new(|_| 0));
        let err = pipeline.run("Kano", date(), &[]).unwrap_err();
        assert!(matches!(err, ForecastError::Features(FeatureError::EmptyBatch)));
    }

    #[test]
    fn test_missing_evening_is_reported() {
        let pipeline = pipeline(Recorder::new(|_| 0));
        let err = pipeline.run("Ota", date(), &lagos_day(0..18)).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Aggregate(AggregateError::EmptySection {
                section: DaySection::Evening
            })
        ));
    }

    #[test]
    fn test_out_of_range_label_is_fatal() {
        let pipeline = pipeline(Recorder::new(|idx| if idx == 5 { 12 } else { 0 }));
        let err = pipeline.run("Lagos", date(), &lagos_day(0..24)).unwrap_err();
        assert!(matches!(err, ForecastError::Codec(CodecError::UnknownLabel(12))));
    }

    #[test]
    fn test_wrong_label_count() {
        let pipeline = pipeline(Arc::new(
            |_: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> { Ok(vec![0, 1]) },
        ));
        let err = pipeline.run("Lagos", date(), &lagos_day(0..24)).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::PredictionCount {
                expected: 24,
                found: 2
            }
        ));
    }

    #[test]
    fn test_classifier_errors_propagate() {
        let pipeline = pipeline(Arc::new(
            |_: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> {
                Err(ClassifierError::Prediction("model not loaded".to_string()))
            },
        ));
        let err = pipeline.run("Abuja", date(), &lagos_day(0..24)).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::Classifier(ClassifierError::Prediction(_))
        ));
    }

    #[test]
    fn test_concurrent_runs_share_one_pipeline() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = counter.clone();
        let pipeline = pipeline(Arc::new(
            move |m: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(vec![7; m.len()])
            },
        ));
        let observations = lagos_day(0..24);

        std::thread::scope(|scope| {
            let handles: Vec<_> = ["Lagos", "Kano", "Ibadan", "Port Harcourt"]
                .into_iter()
                .map(|city| {
                    let pipeline = &pipeline;
                    let observations = &observations;
                    scope.spawn(move || pipeline.run(city, date(), observations))
                })
                .collect();
            for handle in handles {
                let result = handle.join().unwrap().unwrap();
                assert!(result
                    .sections
                    .iter()
                    .all(|s| s.condition == ConditionLabel::Overcast));
            }
        });

        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_observed_condition_is_carried_through() {
        let pipeline = pipeline(Recorder::new(|_| 8));
        let result = pipeline.run("Lagos", date(), &lagos_day(0..24)).unwrap();
        assert!(result.hourly.iter().all(|h| h.observed == "Partly cloudy"));
        assert_eq!(result.observed_agreement(), Some(1.0));
    }
}
