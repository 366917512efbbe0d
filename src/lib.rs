mod cities;
mod classifier;
mod codec;
pub mod dataset;
mod daycast;
mod error;
mod features;
mod pipeline;
mod sections;
mod types;
mod weather_api;

pub use daycast::*;
pub use error::DaycastError;

pub use cities::registry::{City, CityRegistry, LatLon};
pub use classifier::{ConditionClassifier, FeatureMatrix};
pub use codec::ConditionCodec;
pub use dataset::DatasetFormat;

pub use features::encoder::{cyclical, FeatureEncoder, ScalingStats};
pub use features::schema::{ContinuousField, MODEL_COLUMNS};
pub use features::vector::{FeatureRow, FeatureVector};
pub use sections::aggregator::{SectionAggregate, SectionAggregator, SectionMap};

pub use pipeline::forecast::ForecastPipeline;
pub use pipeline::result::{ForecastResult, HourlyForecast, SectionForecast};

pub use types::condition::ConditionLabel;
pub use types::day_section::DaySection;
pub use types::observation::{HourlyObservation, UvIndex};

pub use weather_api::client::{city_date, city_today, WeatherApiClient};
pub use weather_api::config::{
    WeatherApiConfig, DEFAULT_BASE_URL, DEFAULT_FORECAST_TTL, DEFAULT_TIMEOUT,
};
pub use weather_api::response::parse_day;

pub use cities::error::RegistryError;
pub use classifier::ClassifierError;
pub use codec::CodecError;
pub use dataset::error::DatasetError;
pub use features::error::FeatureError;
pub use pipeline::error::ForecastError;
pub use sections::error::AggregateError;
pub use weather_api::error::WeatherApiError;
