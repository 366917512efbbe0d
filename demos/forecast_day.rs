use daycast::{
    city_today, upcoming_dates, ClassifierError, ConditionLabel, ContinuousField, Daycast,
    DaycastError, FeatureMatrix, WeatherApiConfig, DEFAULT_UPCOMING_DAYS,
};
use std::env;
use std::sync::Arc;

/// Stand-in for a trained model: rain when precipitation is above the batch
/// average, cloud when cloud cover is, clear otherwise.
fn rule_of_thumb(matrix: &FeatureMatrix) -> Result<Vec<i64>, ClassifierError> {
    let precip = ContinuousField::Precipitation.index();
    let cloud = ContinuousField::CloudCover.index();
    Ok(matrix
        .rows()
        .iter()
        .map(|row| {
            let label = if row[precip] > 0.5 {
                ConditionLabel::PatchyRainPossible
            } else if row[cloud] > 0.0 {
                ConditionLabel::PartlyCloudy
            } else {
                ConditionLabel::Clear
            };
            label.code()
        })
        .collect())
}

#[tokio::main]
async fn main() -> Result<(), DaycastError> {
    configure_polars_display();
    let city = env::args().nth(1).unwrap_or_else(|| "Lagos".to_string());

    let client = Daycast::builder()
        .classifier(Arc::new(rule_of_thumb))
        .config(WeatherApiConfig::from_env()?)
        .build()?;

    let dates = upcoming_dates(city_today(), DEFAULT_UPCOMING_DAYS);
    let result = client.forecast().city(&city).date(dates[0]).call().await?;

    println!("Forecast for {} on {}", result.city, result.date);
    for section in &result.sections {
        println!("  {}", section);
    }
    match result.to_frame() {
        Ok(frame) => println!("{}", frame),
        Err(e) => eprintln!("Could not tabulate hourly forecast: {}", e),
    }
    Ok(())
}

fn configure_polars_display() {
    // show every row of the day
    env::set_var("POLARS_FMT_MAX_ROWS", "24");
}
