//! Reduces a day of hourly feature vectors to one averaged row per [`DaySection`].

use crate::features::vector::{FeatureRow, FeatureVector};
use crate::sections::error::AggregateError;
use crate::types::day_section::DaySection;
use std::collections::BTreeMap;

/// The averaged features of one day section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAggregate {
    pub section: DaySection,
    /// Number of hourly vectors that fell into the section.
    pub member_hours: usize,
    /// Element-wise mean of the members' feature rows.
    pub row: FeatureRow,
}

/// Section aggregates keyed by section, iterated Night, Morning, Afternoon, Evening.
pub type SectionMap = BTreeMap<DaySection, SectionAggregate>;

pub struct SectionAggregator;

impl SectionAggregator {
    /// Partitions `vectors` by the local hour of each vector and averages each
    /// partition.
    ///
    /// Every section must receive at least one hour: a day with a missing section
    /// is reported, never returned as a partial mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::EmptySection`] naming the first section (in time
    /// of day order) with no member hours.
    pub fn aggregate(vectors: &[FeatureVector]) -> Result<SectionMap, AggregateError> {
        let mut members: BTreeMap<DaySection, Vec<&FeatureRow>> = BTreeMap::new();
        for vector in vectors {
            // Hours come from a chrono timestamp, so they are always below 24.
            if let Some(section) = DaySection::from_hour(vector.hour) {
                members.entry(section).or_default().push(&vector.row);
            }
        }

        DaySection::ALL
            .into_iter()
            .map(|section| -> Result<(DaySection, SectionAggregate), AggregateError> {
                let rows = members.remove(&section).unwrap_or_default();
                let member_hours = rows.len();
                let row = FeatureRow::mean(rows)
                    .ok_or(AggregateError::EmptySection { section })?;
                Ok((
                    section,
                    SectionAggregate {
                        section,
                        member_hours,
                        row,
                    },
                ))
            })
            .collect()
    }
}
