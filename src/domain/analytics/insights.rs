//! Rule-based insights comparing the last week with the weeks before it.

use serde::Serialize;

use crate::domain::journal::JournalEntry;

/// Days in the "recent" window.
pub const RECENT_WINDOW_DAYS: i64 = 7;
/// Days in the full comparison window; the older window is days 7..30.
pub const COMPARISON_WINDOW_DAYS: i64 = 30;

const CONSISTENT_JOURNALING_MIN_ENTRIES: usize = 3;
const WELLNESS_SHIFT_THRESHOLD: f64 = 10.0;
const POSITIVE_MOOD_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Generates insights. Never returns an empty list.
pub fn generate_insights(recent: &[JournalEntry], older: &[JournalEntry]) -> Vec<Insight> {
    let mut insights = Vec::new();

    if recent.len() >= CONSISTENT_JOURNALING_MIN_ENTRIES {
        insights.push(Insight::new(
            InsightKind::Success,
            "Consistent Journaling",
            format!(
                "You've written {} entries in the past week. Great job maintaining your journaling habit!",
                recent.len()
            ),
        ));
    }

    if let (Some(recent_avg), Some(older_avg)) = (mean_wellness(recent), mean_wellness(older)) {
        let change = recent_avg - older_avg;
        if change > WELLNESS_SHIFT_THRESHOLD {
            insights.push(Insight::new(
                InsightKind::Success,
                "Wellness Improvement",
                format!(
                    "Your wellness score has improved by {} points recently. Your self-care efforts are paying off!",
                    (change + 0.5).floor() as i64
                ),
            ));
        } else if change < -WELLNESS_SHIFT_THRESHOLD {
            insights.push(Insight::new(
                InsightKind::Warning,
                "Wellness Attention",
                "Your wellness score has decreased recently. Consider focusing on self-care activities and reach out for support if needed.",
            ));
        }
    }

    if !recent.is_empty() {
        let positive = recent.iter().filter(|e| e.mood().is_positive()).count();
        let ratio = positive as f64 / recent.len() as f64;
        if ratio >= POSITIVE_MOOD_RATIO {
            insights.push(Insight::new(
                InsightKind::Success,
                "Positive Mood Pattern",
                format!(
                    "{}% of your recent entries show positive moods. Keep up the great work!",
                    (ratio * 100.0 + 0.5).floor() as i64
                ),
            ));
        }
    }

    if insights.is_empty() {
        insights.push(Insight::new(
            InsightKind::Info,
            "Keep Going",
            "Continue your journaling journey! Regular reflection helps build self-awareness and emotional wellbeing.",
        ));
    }

    insights
}

/// Mean wellness of scored entries. A score of zero counts as unscored.
fn mean_wellness(entries: &[JournalEntry]) -> Option<f64> {
    let scores: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.wellness_score())
        .filter(|s| *s > 0)
        .map(f64::from)
        .collect();
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
