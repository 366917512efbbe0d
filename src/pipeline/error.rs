use crate::cities::error::RegistryError;
use crate::classifier::ClassifierError;
use crate::codec::CodecError;
use crate::features::error::FeatureError;
use crate::sections::error::AggregateError;
use thiserror::Error;

/// Everything that can stop a forecast. Each stage keeps its own error kind so
/// callers can tell bad input (unknown city), incomplete data (empty batch or
/// section) and model contract violations (unknown label, wrong label count) apart.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Features(#[from] FeatureError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("Classifier returned {found} labels for {expected} rows")]
    PredictionCount { expected: usize, found: usize },
}
