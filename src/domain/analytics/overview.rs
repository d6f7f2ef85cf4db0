//! Journaling overview: totals, monthly activity and average wellness.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::journal::Mood;

/// Wellness reported when nothing has been analyzed yet.
pub const DEFAULT_AVERAGE_WELLNESS: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_entries: u64,
    pub entries_this_month: u64,
    pub average_wellness: u8,
    pub analyzed_entries_count: u64,
    /// Only moods that occur at least once.
    pub mood_distribution: BTreeMap<String, u64>,
}

/// Builds the overview from pre-aggregated counts.
pub fn compute_overview(
    total_entries: u64,
    entries_this_month: u64,
    wellness_scores: &[u8],
    mood_counts: &[(Mood, u64)],
) -> AnalyticsOverview {
    let mood_distribution = mood_counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(mood, count)| (mood.as_str().to_string(), *count))
        .collect();

    AnalyticsOverview {
        total_entries,
        entries_this_month,
        average_wellness: average_wellness(wellness_scores),
        analyzed_entries_count: wellness_scores.len() as u64,
        mood_distribution,
    }
}

/// Rounded mean of the scores, or 50 when there are none. A score of 0 is
/// an unscored entry and counts as 50.
pub fn average_wellness(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return DEFAULT_AVERAGE_WELLNESS;
    }
    let sum: u64 = scores
        .iter()
        .map(|s| match s {
            0 => u64::from(DEFAULT_AVERAGE_WELLNESS),
            s => u64::from(*s),
        })
        .sum();
    let mean = sum as f64 / scores.len() as f64;
    round_half_up(mean).clamp(0.0, 100.0) as u8
}

/// Rounds half-way values toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scores_default_to_fifty() {
        assert_eq!(average_wellness(&[]), 50);
    }

    #[test]
    fn mean_is_rounded() {
        assert_eq!(average_wellness(&[75, 65]), 70);
        assert_eq!(average_wellness(&[75, 35, 25]), 45);
        assert_eq!(average_wellness(&[65, 50]), 58);
    }

    #[test]
    fn zero_scores_count_as_fifty() {
        assert_eq!(average_wellness(&[0]), 50);
        assert_eq!(average_wellness(&[0, 70]), 60);
        assert_eq!(compute_overview(2, 2, &[0, 90], &[]).average_wellness, 70);
    }

    #[test]
    fn overview_skips_absent_moods() {
        let overview = compute_overview(
            4,
            2,
            &[75, 25],
            &[(Mood::Happy, 3), (Mood::Sad, 1), (Mood::Neutral, 0)],
        );
        assert_eq!(overview.average_wellness, 50);
        assert_eq!(overview.analyzed_entries_count, 2);
        assert_eq!(overview.mood_distribution.len(), 2);
        assert_eq!(overview.mood_distribution["happy"], 3);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(compute_overview(0, 0, &[], &[])).unwrap();
        assert_eq!(json["averageWellness"], 50);
        assert_eq!(json["entriesThisMonth"], 0);
        assert!(json["moodDistribution"].as_object().unwrap().is_empty());
    }
}
