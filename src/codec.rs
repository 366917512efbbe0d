//! Bidirectional mapping between classifier labels and [`ConditionLabel`]s.

use crate::types::condition::ConditionLabel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Classifier label {0} is outside the trained range 0..=11")]
    UnknownLabel(i64),

    #[error("Unknown weather condition '{0}'")]
    UnknownCondition(String),
}

/// Spelling found in older training data for [`ConditionLabel::ThunderyOutbreakPossible`].
const LEGACY_THUNDERY: &str = "Thundry Outbreak Possible";

/// Decodes classifier output and encodes condition names.
///
/// Decoding is strict: a label the model was not trained with is an error, never a
/// fallback string, because it means the model and this table have drifted apart.
pub struct ConditionCodec;

impl ConditionCodec {
    /// ```
    /// use daycast::{ConditionCodec, ConditionLabel};
    ///
    /// assert_eq!(ConditionCodec::decode(7).unwrap(), ConditionLabel::Overcast);
    /// assert!(ConditionCodec::decode(42).is_err());
    /// ```
    pub fn decode(code: i64) -> Result<ConditionLabel, CodecError> {
        ConditionLabel::from_code(code).ok_or(CodecError::UnknownLabel(code))
    }

    /// Decodes a whole prediction sequence, failing on the first unknown label.
    pub fn decode_all(codes: &[i64]) -> Result<Vec<ConditionLabel>, CodecError> {
        codes.iter().map(|&code| Self::decode(code)).collect()
    }

    /// Maps a condition name to its classifier label, ignoring case and surrounding
    /// whitespace.
    pub fn encode(name: &str) -> Result<i64, CodecError> {
        Self::parse(name).map(ConditionLabel::code)
    }

    /// Maps a condition name to its [`ConditionLabel`].
    pub fn parse(name: &str) -> Result<ConditionLabel, CodecError> {
        let wanted = name.trim();
        if wanted.eq_ignore_ascii_case(LEGACY_THUNDERY) {
            return Ok(ConditionLabel::ThunderyOutbreakPossible);
        }
        ConditionLabel::ALL
            .into_iter()
            .find(|label| label.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CodecError::UnknownCondition(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_inverts_encode() {
        for label in ConditionLabel::ALL {
            let code = ConditionCodec::encode(label.name()).unwrap();
            assert_eq!(ConditionCodec::decode(code).unwrap(), label);
        }
    }

    #[test]
    fn test_decode_table() {
        let names: Vec<&str> = (0..12)
            .map(|code| ConditionCodec::decode(code).unwrap().name())
            .collect();
        assert_eq!(
            names,
            [
                "Clear",
                "Cloudy",
                "Heavy Rain at Times",
                "Light Rain Shower",
                "Mist",
                "Moderate or Heavy Rain Shower",
                "Moderate Rain at Times",
                "Overcast",
                "Partly Cloudy",
                "Patchy Light Rain with Thunder",
                "Patchy Rain Possible",
                "Thundery Outbreak Possible",
            ]
        );
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        assert!(matches!(
            ConditionCodec::decode(12),
            Err(CodecError::UnknownLabel(12))
        ));
        assert!(matches!(
            ConditionCodec::decode(-3),
            Err(CodecError::UnknownLabel(-3))
        ));
        assert!(matches!(
            ConditionCodec::decode_all(&[0, 1, 99, 2]),
            Err(CodecError::UnknownLabel(99))
        ));
    }

    #[test]
    fn test_encode_is_lenient_about_case_and_legacy_spelling() {
        assert_eq!(ConditionCodec::encode("partly cloudy").unwrap(), 8);
        assert_eq!(ConditionCodec::encode(" Mist ").unwrap(), 4);
        assert_eq!(ConditionCodec::encode("Thundry Outbreak Possible").unwrap(), 11);
    }

    #[test]
    fn test_encode_unknown_name() {
        assert!(matches!(
            ConditionCodec::encode("Blizzard"),
            Err(CodecError::UnknownCondition(ref n)) if n == "Blizzard"
        ));
    }
}
