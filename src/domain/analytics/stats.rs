//! Journaling statistics for the journal page: totals, mood counts and
//! recent day-by-day activity.

use serde::Serialize;

use crate::domain::journal::Mood;

/// Trailing window, in days, covered by `recent_activity`.
pub const RECENT_ACTIVITY_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: u64,
}

/// Entries created on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_entries: u64,
    pub entries_this_month: u64,
    pub mood_distribution: Vec<MoodCount>,
    /// Days without entries are absent. Oldest day first.
    pub recent_activity: Vec<DayCount>,
}

/// Assembles the stats from repository aggregates. Zero counts are dropped
/// and days are ordered by date regardless of input order.
pub fn compute_journal_stats(
    total_entries: u64,
    entries_this_month: u64,
    mood_counts: &[(Mood, u64)],
    daily_counts: &[(String, u64)],
) -> JournalStats {
    let mood_distribution = mood_counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(mood, count)| MoodCount {
            mood: *mood,
            count: *count,
        })
        .collect();

    let mut recent_activity: Vec<DayCount> = daily_counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(date, count)| DayCount {
            date: date.clone(),
            count: *count,
        })
        .collect();
    recent_activity.sort_by(|a, b| a.date.cmp(&b.date));

    JournalStats {
        total_entries,
        entries_this_month,
        mood_distribution,
        recent_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_are_sorted_and_empty_buckets_dropped() {
        let stats = compute_journal_stats(
            5,
            3,
            &[(Mood::Happy, 2), (Mood::Neutral, 0), (Mood::Sad, 3)],
            &[
                ("2024-03-09".to_string(), 2),
                ("2024-03-07".to_string(), 1),
                ("2024-03-08".to_string(), 0),
            ],
        );

        let days: Vec<_> = stats.recent_activity.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(days, vec!["2024-03-07", "2024-03-09"]);
        assert_eq!(stats.mood_distribution.len(), 2);
        assert_eq!(stats.mood_distribution[1], MoodCount { mood: Mood::Sad, count: 3 });
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let stats = compute_journal_stats(1, 1, &[(Mood::Happy, 1)], &[("2024-03-09".to_string(), 1)]);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalEntries"], 1);
        assert_eq!(json["entriesThisMonth"], 1);
        assert_eq!(json["moodDistribution"][0]["mood"], "happy");
        assert_eq!(json["recentActivity"][0]["date"], "2024-03-09");
        assert_eq!(json["recentActivity"][0]["count"], 1);
    }
}
