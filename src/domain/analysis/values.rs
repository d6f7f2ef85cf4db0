//! Analysis value objects.
//!
//! `AnalysisResult` is a fully populated analysis as produced by the external
//! model or the fallback heuristic. `EntryAnalysis` is the stored, possibly
//! partial document embedded in a journal entry; its field names follow the
//! camelCase JSON shape used by the API and the JSONB column.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Score above which a sentiment is labelled positive.
pub const POSITIVE_LABEL_THRESHOLD: f64 = 0.1;

/// Score below which a sentiment is labelled negative.
pub const NEGATIVE_LABEL_THRESHOLD: f64 = -0.1;

/// Categorical sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    /// Only ever produced by the external model.
    Mixed,
}

impl SentimentLabel {
    /// Derives a label from a score using the fixed thresholds.
    ///
    /// Never yields `Mixed`.
    pub fn for_score(score: f64) -> Self {
        if score > POSITIVE_LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Parses a label case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            "mixed" => Some(SentimentLabel::Mixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Mixed => "mixed",
        }
    }
}

/// Sentiment of an entry.
///
/// # Invariants
///
/// - `score` in [-1, 1]
/// - `magnitude` in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub magnitude: f64,
    pub label: SentimentLabel,
}

impl Sentiment {
    /// Creates a sentiment, clamping score and magnitude into range.
    pub fn new(score: f64, magnitude: f64, label: SentimentLabel) -> Self {
        Self {
            score: clamp_finite(score, -1.0, 1.0),
            magnitude: clamp_finite(magnitude, 0.0, 1.0),
            label,
        }
    }
}

/// A detected emotion with model confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub emotion: String,
    pub confidence: f64,
}

impl EmotionScore {
    pub fn new(emotion: impl Into<String>, confidence: f64) -> Self {
        Self {
            emotion: emotion.into(),
            confidence: clamp_finite(confidence, 0.0, 1.0),
        }
    }
}

/// Free-text observations attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisInsights {
    #[serde(default)]
    pub patterns: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub concerns: String,
    #[serde(default)]
    pub growth: String,
}

/// A complete analysis, before it is stamped and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub emotions: Vec<EmotionScore>,
    pub keywords: Vec<String>,
    /// Integer in [0, 100].
    pub wellness_score: u8,
    pub suggestions: Vec<String>,
    pub insights: Option<AnalysisInsights>,
}

/// Stored analysis document embedded in a journal entry.
///
/// Every field is optional at rest: older or interrupted writes can leave a
/// partial document behind. See [`super::evaluate`] for how such documents
/// are classified.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub emotions: Vec<EmotionScore>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellness_score: Option<u8>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<AnalysisInsights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<Timestamp>,
}

impl EntryAnalysis {
    /// Stamps a computed result with the time it was produced.
    pub fn from_result(result: AnalysisResult, analyzed_at: Timestamp) -> Self {
        Self {
            sentiment: Some(result.sentiment),
            emotions: result.emotions,
            keywords: result.keywords,
            wellness_score: Some(result.wellness_score),
            suggestions: result.suggestions,
            insights: result.insights,
            analyzed_at: Some(analyzed_at),
        }
    }

    /// Sentiment score, if any.
    pub fn sentiment_score(&self) -> Option<f64> {
        self.sentiment.as_ref().map(|s| s.score)
    }
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0_f64.clamp(min, max);
    }
    value.clamp(min, max)
}
