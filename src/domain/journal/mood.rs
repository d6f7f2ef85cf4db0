//! Self-reported mood attached to every journal entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Mood scale, from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    VerySad,
    Sad,
    Neutral,
    Happy,
    VeryHappy,
}

impl Mood {
    /// All moods in scale order.
    pub const ALL: [Mood; 5] = [
        Mood::VerySad,
        Mood::Sad,
        Mood::Neutral,
        Mood::Happy,
        Mood::VeryHappy,
    ];

    /// Wire name (`very_sad`, `happy`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::VerySad => "very_sad",
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::VeryHappy => "very_happy",
        }
    }

    /// Human-readable form with the underscore replaced by a space.
    pub fn display_label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Returns true for `happy` and `very_happy`.
    pub fn is_positive(&self) -> bool {
        matches!(self, Mood::Happy | Mood::VeryHappy)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "mood",
                    "must be one of very_sad, sad, neutral, happy, very_happy",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn rejects_unknown_mood() {
        let err = "ecstatic".parse::<Mood>().unwrap_err();
        assert_eq!(err.field(), "mood");
    }

    #[test]
    fn display_label_replaces_underscore() {
        assert_eq!(Mood::VeryHappy.display_label(), "very happy");
        assert_eq!(Mood::Sad.display_label(), "sad");
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Mood::VerySad).unwrap(), "\"very_sad\"");
    }

    #[test]
    fn positive_moods() {
        assert!(Mood::Happy.is_positive());
        assert!(Mood::VeryHappy.is_positive());
        assert!(!Mood::Neutral.is_positive());
    }
}
