//! Kind of support a chat session is focused on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    GeneralSupport,
    MoodAnalysis,
    CopingStrategies,
    CrisisIntervention,
}

impl SessionType {
    pub const ALL: [SessionType; 4] = [
        SessionType::GeneralSupport,
        SessionType::MoodAnalysis,
        SessionType::CopingStrategies,
        SessionType::CrisisIntervention,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::GeneralSupport => "general_support",
            SessionType::MoodAnalysis => "mood_analysis",
            SessionType::CopingStrategies => "coping_strategies",
            SessionType::CrisisIntervention => "crisis_intervention",
        }
    }

    /// Parses a wire name, falling back to `GeneralSupport` for anything unknown.
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "sessionType",
                    "must be one of general_support, mood_analysis, coping_strategies, crisis_intervention",
                )
            })
    }
}
