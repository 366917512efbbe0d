//! Defines the `ConditionLabel` enum, the closed set of weather conditions the
//! condition classifier was trained to predict.

use std::fmt;

/// A weather condition class known to the pre-trained classifier.
///
/// Every variant is bound to the integer code the classifier emits. The order of
/// the codes is part of the model's training contract: reordering variants without
/// retraining the model silently mislabels every prediction.
///
/// Convert a raw classifier label with [`ConditionLabel::from_code`], or go through
/// [`crate::ConditionCodec`] to get an error instead of `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionLabel {
    /// Code 0.
    Clear = 0,
    /// Code 1.
    Cloudy = 1,
    /// Code 2.
    HeavyRainAtTimes = 2,
    /// Code 3.
    LightRainShower = 3,
    /// Code 4.
    Mist = 4,
    /// Code 5.
    ModerateOrHeavyRainShower = 5,
    /// Code 6.
    ModerateRainAtTimes = 6,
    /// Code 7.
    Overcast = 7,
    /// Code 8.
    PartlyCloudy = 8,
    /// Code 9.
    PatchyLightRainWithThunder = 9,
    /// Code 10.
    PatchyRainPossible = 10,
    /// Code 11.
    ThunderyOutbreakPossible = 11,
}

impl ConditionLabel {
    /// All labels in ascending code order.
    pub const ALL: [ConditionLabel; 12] = [
        ConditionLabel::Clear,
        ConditionLabel::Cloudy,
        ConditionLabel::HeavyRainAtTimes,
        ConditionLabel::LightRainShower,
        ConditionLabel::Mist,
        ConditionLabel::ModerateOrHeavyRainShower,
        ConditionLabel::ModerateRainAtTimes,
        ConditionLabel::Overcast,
        ConditionLabel::PartlyCloudy,
        ConditionLabel::PatchyLightRainWithThunder,
        ConditionLabel::PatchyRainPossible,
        ConditionLabel::ThunderyOutbreakPossible,
    ];

    /// Attempts to convert a classifier label into a `ConditionLabel`.
    ///
    /// Returns `None` for anything outside `0..=11`.
    ///
    /// ```rust
    /// use daycast::ConditionLabel;
    ///
    /// assert_eq!(ConditionLabel::from_code(4), Some(ConditionLabel::Mist));
    /// assert_eq!(ConditionLabel::from_code(12), None);
    /// ```
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    /// The integer code the classifier uses for this label.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Human-readable name, as it appears in the training data.
    pub fn name(self) -> &'static str {
        match self {
            ConditionLabel::Clear => "Clear",
            ConditionLabel::Cloudy => "Cloudy",
            ConditionLabel::HeavyRainAtTimes => "Heavy Rain at Times",
            ConditionLabel::LightRainShower => "Light Rain Shower",
            ConditionLabel::Mist => "Mist",
            ConditionLabel::ModerateOrHeavyRainShower => "Moderate or Heavy Rain Shower",
            ConditionLabel::ModerateRainAtTimes => "Moderate Rain at Times",
            ConditionLabel::Overcast => "Overcast",
            ConditionLabel::PartlyCloudy => "Partly Cloudy",
            ConditionLabel::PatchyLightRainWithThunder => "Patchy Light Rain with Thunder",
            ConditionLabel::PatchyRainPossible => "Patchy Rain Possible",
            ConditionLabel::ThunderyOutbreakPossible => "Thundery Outbreak Possible",
        }
    }

    /// Emoji shortcode used when rendering the label.
    pub fn glyph(self) -> &'static str {
        match self {
            ConditionLabel::Clear => ":sun_with_face:",
            ConditionLabel::Cloudy => ":cloud:",
            ConditionLabel::HeavyRainAtTimes => ":rain_cloud:",
            ConditionLabel::LightRainShower => ":partly_sunny_rain:",
            ConditionLabel::Mist => ":fog:",
            ConditionLabel::ModerateOrHeavyRainShower => ":rain_cloud:",
            ConditionLabel::ModerateRainAtTimes => ":umbrella:",
            ConditionLabel::Overcast => ":cloud:",
            ConditionLabel::PartlyCloudy => ":barely_sunny:",
            ConditionLabel::PatchyLightRainWithThunder => ":thunder_cloud_and_rain:",
            ConditionLabel::PatchyRainPossible => ":partly_sunny_rain:",
            ConditionLabel::ThunderyOutbreakPossible => ":lightning:",
        }
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
