use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown city '{0}'")]
    UnknownCity(String),

    #[error("No registered city within {radius} km of ({lat}, {lon})")]
    NoCityWithinRadius { radius: f64, lat: f64, lon: f64 },
}
