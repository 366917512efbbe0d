use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Cannot encode an empty batch of observations: scaling statistics are undefined")]
    EmptyBatch,
}
