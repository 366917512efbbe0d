use crate::codec::ConditionCodec;
use crate::types::condition::ConditionLabel;
use crate::types::day_section::DaySection;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::fmt;

/// Predicted condition for one observed hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    pub timestamp: NaiveDateTime,
    pub hour: u32,
    pub condition: ConditionLabel,
    /// The condition reported by the provider for that hour.
    pub observed: String,
}

/// Predicted condition for one section of the day.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionForecast {
    pub section: DaySection,
    pub member_hours: usize,
    pub condition: ConditionLabel,
}

/// Renders e.g. `Night (00:00 - 05:00): CLEAR :sun_with_face:`.
impl fmt::Display for SectionForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} {}",
            self.section,
            self.section.window(),
            self.condition.name().to_uppercase(),
            self.condition.glyph()
        )
    }
}

/// Forecast for one city and date.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub city: String,
    pub date: NaiveDate,
    /// One entry per input observation, in input order.
    pub hourly: Vec<HourlyForecast>,
    /// Exactly four entries, Night to Evening.
    pub sections: Vec<SectionForecast>,
}

impl ForecastResult {
    pub fn section(&self, section: DaySection) -> Option<&SectionForecast> {
        self.sections.iter().find(|s| s.section == section)
    }

    /// Share of hours whose reported condition matches the prediction.
    ///
    /// Hours whose reported condition is not one of the known labels are skipped.
    /// Returns `None` when no hour could be compared.
    pub fn observed_agreement(&self) -> Option<f64> {
        let (compared, matched) = self
            .hourly
            .iter()
            .filter_map(|h| {
                ConditionCodec::parse(&h.observed)
                    .ok()
                    .map(|observed| observed == h.condition)
            })
            .fold((0usize, 0usize), |(n, m), hit| (n + 1, m + usize::from(hit)));

        (compared > 0).then(|| matched as f64 / compared as f64)
    }

    /// The hourly forecast as a table with columns
    /// `date_time, hour, observed, predicted, glyph`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let date_times: Vec<String> = self
            .hourly
            .iter()
            .map(|h| h.timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
            .collect();
        let hours: Vec<u32> = self.hourly.iter().map(|h| h.hour).collect();
        let observed: Vec<&str> = self.hourly.iter().map(|h| h.observed.as_str()).collect();
        let predicted: Vec<&str> = self.hourly.iter().map(|h| h.condition.name()).collect();
        let glyphs: Vec<&str> = self.hourly.iter().map(|h| h.condition.glyph()).collect();

        DataFrame::new(vec![
            Column::new("date_time".into(), date_times),
            Column::new("hour".into(), hours),
            Column::new("observed".into(), observed),
            Column::new("predicted".into(), predicted),
            Column::new("glyph".into(), glyphs),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> ForecastResult {
        let date = NaiveDate::from_ymd_opt(2023, 5, 12).unwrap();
        let conditions = [
            (ConditionLabel::Clear, "Clear"),
            (ConditionLabel::Mist, "Mist"),
            (ConditionLabel::Overcast, "Partly cloudy"),
            (ConditionLabel::Cloudy, "Sunny"),
        ];
        ForecastResult {
            city: "Lagos".to_string(),
            date,
            hourly: conditions
                .iter()
                .enumerate()
                .map(|(h, (condition, observed))| HourlyForecast {
                    timestamp: date.and_hms_opt(h as u32, 0, 0).unwrap(),
                    hour: h as u32,
                    condition: *condition,
                    observed: observed.to_string(),
                })
                .collect(),
            sections: DaySection::ALL
                .iter()
                .map(|s| SectionForecast {
                    section: *s,
                    member_hours: 6,
                    condition: ConditionLabel::PartlyCloudy,
                })
                .collect(),
        }
    }

    #[test]
    fn test_section_display() {
        let forecast = SectionForecast {
            section: DaySection::Morning,
            member_hours: 6,
            condition: ConditionLabel::PatchyRainPossible,
        };
        assert_eq!(
            forecast.to_string(),
            "Morning (06:00 - 11:00): PATCHY RAIN POSSIBLE :partly_sunny_rain:"
        );
    }

    #[test]
    fn test_observed_agreement_skips_unknown_conditions() {
        // "Sunny" is not a known label; of the other three hours two match.
        let agreement = result().observed_agreement().unwrap();
        assert!((agreement - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_observed_agreement_none_when_nothing_comparable() {
        let mut r = result();
        r.hourly.iter_mut().for_each(|h| h.observed = "Sunny".to_string());
        assert_eq!(r.observed_agreement(), None);
    }

    #[test]
    fn test_section_lookup() {
        let r = result();
        assert_eq!(
            r.section(DaySection::Evening).unwrap().condition,
            ConditionLabel::PartlyCloudy
        );
    }

    #[test]
    fn test_to_frame() -> Result<(), PolarsError> {
        let df = result().to_frame()?;
        assert_eq!(df.shape(), (4, 5));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["date_time", "hour", "observed", "predicted", "glyph"]);
        let predicted = df.column("predicted")?.str()?;
        assert_eq!(predicted.get(1), Some("Mist"));
        let date_time = df.column("date_time")?.str()?;
        assert_eq!(date_time.get(2), Some("2023-05-12 02:00:00"));
        Ok(())
    }
}
