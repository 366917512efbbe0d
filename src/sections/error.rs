use crate::types::day_section::DaySection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Day section {section} ({}) has no hourly data", .section.window())]
    EmptySection { section: DaySection },
}
