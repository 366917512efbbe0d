use chrono::Days;
use daycast::dataset::{read_day, write_observations};
use daycast::{
    city_today, ClassifierError, DatasetFormat, Daycast, DaycastError, FeatureMatrix,
    WeatherApiConfig,
};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), DaycastError> {
    let unused = |m: &FeatureMatrix| -> Result<Vec<i64>, ClassifierError> { Ok(vec![0; m.len()]) };
    let client = Daycast::builder()
        .classifier(Arc::new(unused))
        .config(WeatherApiConfig::from_env()?)
        .build()?;

    let today = city_today();
    let start = today.checked_sub_days(Days::new(3)).unwrap_or(today);
    let end = today.pred_opt().unwrap_or(today);

    let mut observations = Vec::new();
    for city in client.registry().cities() {
        observations.extend(client.collect_history(city.name, start, end).await?);
    }

    let path = Path::new("history.parquet");
    write_observations(path, &observations, DatasetFormat::Parquet)?;
    println!("Wrote {} rows to {}", observations.len(), path.display());

    let ota = read_day(path, "Ota", start)?;
    println!("Ota on {}: {} hours", start, ota.len());
    Ok(())
}
