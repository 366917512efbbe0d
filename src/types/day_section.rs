//! Defines `DaySection`, the four fixed six-hour windows a day is split into.

use std::fmt;
use std::ops::Range;

/// One of the four six-hour windows of a day.
///
/// Windows are half-open on the local hour: Night is `[0, 6)`, Morning `[6, 12)`,
/// Afternoon `[12, 18)` and Evening `[18, 24)`. Variants are ordered by time of day,
/// so ordered collections keyed by `DaySection` iterate Night first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DaySection {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DaySection {
    /// All sections in time-of-day order.
    pub const ALL: [DaySection; 4] = [
        DaySection::Night,
        DaySection::Morning,
        DaySection::Afternoon,
        DaySection::Evening,
    ];

    /// Maps a local hour to its section. Returns `None` for hours outside `0..24`.
    ///
    /// ```rust
    /// use daycast::DaySection;
    ///
    /// assert_eq!(DaySection::from_hour(0), Some(DaySection::Night));
    /// assert_eq!(DaySection::from_hour(6), Some(DaySection::Morning));
    /// assert_eq!(DaySection::from_hour(23), Some(DaySection::Evening));
    /// assert_eq!(DaySection::from_hour(24), None);
    /// ```
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0..=5 => Some(DaySection::Night),
            6..=11 => Some(DaySection::Morning),
            12..=17 => Some(DaySection::Afternoon),
            18..=23 => Some(DaySection::Evening),
            _ => None,
        }
    }

    /// The hours covered by this section.
    pub fn hours(self) -> Range<u32> {
        match self {
            DaySection::Night => 0..6,
            DaySection::Morning => 6..12,
            DaySection::Afternoon => 12..18,
            DaySection::Evening => 18..24,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DaySection::Night => "Night",
            DaySection::Morning => "Morning",
            DaySection::Afternoon => "Afternoon",
            DaySection::Evening => "Evening",
        }
    }

    /// Clock window of the section, e.g. `"06:00 - 11:00"` for Morning.
    pub fn window(self) -> String {
        let hours = self.hours();
        format!("{:02}:00 - {:02}:00", hours.start, hours.end - 1)
    }
}

impl fmt::Display for DaySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
