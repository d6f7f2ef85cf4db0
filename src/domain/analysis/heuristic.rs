//! Keyword-counting fallback analyzer.
//!
//! Used whenever the external model is unavailable or returns something
//! unusable. Deterministic and pure: the same title, content and mood always
//! produce the same analysis.
//!
//! Scores are accumulated in integer tenths and converted once at the end so
//! band boundaries (0, ±0.3) compare exactly.

use super::{AnalysisInsights, AnalysisResult, EmotionScore, Sentiment, SentimentLabel};
use crate::domain::journal::Mood;

/// Words that push the score up when they dominate the content.
pub const POSITIVE_WORDS: [&str; 10] = [
    "happy",
    "joy",
    "good",
    "great",
    "amazing",
    "wonderful",
    "excited",
    "grateful",
    "love",
    "success",
];

/// Words that push the score down when they dominate the content.
pub const NEGATIVE_WORDS: [&str; 10] = [
    "sad",
    "angry",
    "frustrated",
    "worried",
    "anxious",
    "stressed",
    "depressed",
    "tired",
    "lonely",
    "difficult",
];

pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Continue regular journaling to track your mental wellness",
    "Consider talking to friends or family about your experiences",
    "Practice mindfulness or meditation to enhance self-awareness",
];

const INSIGHT_PATTERNS: &str =
    "This entry reflects your current emotional state and daily experiences";
const INSIGHT_STRENGTHS: &str = "You are actively engaging in self-reflection through journaling";
const INSIGHT_GROWTH: &str =
    "Continue using journaling as a tool for emotional processing and growth";
const CONCERN_NEGATIVE: &str = "Consider seeking support if negative feelings persist";
const CONCERN_NONE: &str = "No major concerns identified";

const EMOTION_CONFIDENCE: f64 = 0.8;
const KEYWORD_ADJUSTMENT_TENTHS: i32 = 3;

/// Base score for a mood, in tenths.
fn base_tenths(mood: Mood) -> i32 {
    match mood {
        Mood::VeryHappy => 8,
        Mood::Happy => 5,
        Mood::Neutral => 0,
        Mood::Sad => -5,
        Mood::VerySad => -8,
    }
}

/// Base sentiment score for a mood.
pub fn base_score(mood: Mood) -> f64 {
    f64::from(base_tenths(mood)) / 10.0
}

/// Counts case-insensitive, non-overlapping occurrences of each word.
///
/// Matches are substrings, so "unhappy" counts as "happy".
pub fn count_occurrences(content_lower: &str, words: &[&str]) -> usize {
    words
        .iter()
        .map(|word| content_lower.matches(word).count())
        .sum()
}

/// Maps a sentiment score onto the fixed wellness bands.
pub fn wellness_score_for(score: f64) -> u8 {
    if score > 0.3 {
        75
    } else if score > 0.0 {
        65
    } else if score < -0.3 {
        25
    } else if score < 0.0 {
        35
    } else {
        50
    }
}

/// Produces a complete analysis from the entry alone.
pub fn analyze(title: &str, content: &str, mood: Mood) -> AnalysisResult {
    let content_lower = content.to_lowercase();
    let positive = count_occurrences(&content_lower, &POSITIVE_WORDS);
    let negative = count_occurrences(&content_lower, &NEGATIVE_WORDS);

    let mut tenths = base_tenths(mood);
    if positive > negative {
        tenths += KEYWORD_ADJUSTMENT_TENTHS;
    } else if negative > positive {
        tenths -= KEYWORD_ADJUSTMENT_TENTHS;
    }
    let tenths = tenths.clamp(-10, 10);
    let score = f64::from(tenths) / 10.0;

    let concerns = if score < 0.0 {
        CONCERN_NEGATIVE
    } else {
        CONCERN_NONE
    };

    AnalysisResult {
        sentiment: Sentiment::new(score, score.abs(), SentimentLabel::for_score(score)),
        emotions: vec![EmotionScore::new(mood.display_label(), EMOTION_CONFIDENCE)],
        keywords: vec![
            title.to_lowercase(),
            "journal".to_string(),
            "reflection".to_string(),
        ],
        wellness_score: wellness_score_for(score),
        suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        insights: Some(AnalysisInsights {
            patterns: INSIGHT_PATTERNS.to_string(),
            strengths: INSIGHT_STRENGTHS.to_string(),
            concerns: concerns.to_string(),
            growth: INSIGHT_GROWTH.to_string(),
        }),
    }
}
