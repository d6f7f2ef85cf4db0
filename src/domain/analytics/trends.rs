//! Wellness trends over a trailing window of days.

use std::collections::BTreeMap;

use serde::Serialize;

use super::overview::{average_wellness, round_half_up};
use crate::domain::foundation::Timestamp;
use crate::domain::journal::{JournalEntry, Mood};

pub const DEFAULT_TREND_PERIOD_DAYS: u32 = 30;
pub const MAX_TREND_PERIOD_DAYS: u32 = 365;

/// One analyzed entry on the trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// `YYYY-MM-DD` (UTC) of the entry's creation.
    pub date: String,
    pub wellness_score: u8,
    pub sentiment_score: f64,
    pub mood: Mood,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessTrends {
    pub period: u32,
    pub total_entries: usize,
    pub average_wellness: u8,
    /// Rounded to two decimal places.
    pub average_sentiment: f64,
    pub trends: Vec<TrendPoint>,
    pub mood_frequency: BTreeMap<String, u64>,
}

/// Normalizes a requested period to 1..=365 days, defaulting to 30.
pub fn clamp_period(requested: Option<i64>) -> u32 {
    match requested {
        Some(days) if days >= 1 => days.min(i64::from(MAX_TREND_PERIOD_DAYS)) as u32,
        Some(_) => 1,
        None => DEFAULT_TREND_PERIOD_DAYS,
    }
}

/// Computes trends from entries in the window.
///
/// Entries without a wellness score are ignored. Points are ordered oldest
/// first regardless of input order.
pub fn compute_trends(period: u32, entries: &[JournalEntry]) -> WellnessTrends {
    let mut analyzed: Vec<&JournalEntry> = entries
        .iter()
        .filter(|e| e.wellness_score().is_some())
        .collect();
    analyzed.sort_by_key(|e| *e.created_at());

    let mut scores = Vec::with_capacity(analyzed.len());
    let mut sentiment_sum = 0.0;
    let mut mood_frequency = BTreeMap::new();
    let mut trends = Vec::with_capacity(analyzed.len());

    for entry in &analyzed {
        let wellness = entry.wellness_score().unwrap_or_default();
        let sentiment = entry
            .analysis()
            .and_then(|a| a.sentiment_score())
            .unwrap_or(0.0);

        scores.push(wellness);
        sentiment_sum += sentiment;
        *mood_frequency
            .entry(entry.mood().as_str().to_string())
            .or_insert(0) += 1;

        trends.push(TrendPoint {
            date: entry.created_at().date_string(),
            wellness_score: wellness,
            sentiment_score: sentiment,
            mood: entry.mood(),
            title: entry.title().to_string(),
        });
    }

    let average_sentiment = if analyzed.is_empty() {
        0.0
    } else {
        round_half_up(sentiment_sum / analyzed.len() as f64 * 100.0) / 100.0
    };

    WellnessTrends {
        period,
        total_entries: analyzed.len(),
        average_wellness: average_wellness(&scores),
        average_sentiment,
        trends,
        mood_frequency,
    }
}

/// One analyzed entry in the plain score history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePoint {
    pub date: String,
    pub wellness_score: u8,
    pub mood: Mood,
}

/// Score history served alongside entry analysis. Unlike `WellnessTrends`
/// the mean is taken over raw scores and is 0 for an empty window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistory {
    pub period: u32,
    pub average_wellness: u8,
    pub trends: Vec<ScorePoint>,
    pub total_entries: usize,
}

pub fn compute_score_history(period: u32, entries: &[JournalEntry]) -> ScoreHistory {
    let mut trends: Vec<(Timestamp, ScorePoint)> = entries
        .iter()
        .filter_map(|entry| {
            let wellness_score = entry.wellness_score()?;
            Some((
                *entry.created_at(),
                ScorePoint {
                    date: entry.created_at().date_string(),
                    wellness_score,
                    mood: entry.mood(),
                },
            ))
        })
        .collect();
    trends.sort_by_key(|(created, _)| *created);
    let trends: Vec<ScorePoint> = trends.into_iter().map(|(_, point)| point).collect();

    let average_wellness = if trends.is_empty() {
        0
    } else {
        let sum: u64 = trends.iter().map(|p| u64::from(p.wellness_score)).sum();
        round_half_up(sum as f64 / trends.len() as f64).clamp(0.0, 100.0) as u8
    };

    ScoreHistory {
        period,
        average_wellness,
        total_entries: trends.len(),
        trends,
    }
}
