//! Analytics module - pure calculators over a user's journal history.
//!
//! Repositories supply the raw counts and entries; everything here is
//! deterministic given its inputs.

mod insights;
mod overview;
mod stats;
mod trends;

pub use insights::{
    generate_insights, Insight, InsightKind, COMPARISON_WINDOW_DAYS, RECENT_WINDOW_DAYS,
};
pub use overview::{average_wellness, compute_overview, AnalyticsOverview, DEFAULT_AVERAGE_WELLNESS};
pub use stats::{compute_journal_stats, DayCount, JournalStats, MoodCount, RECENT_ACTIVITY_DAYS};
pub use trends::{
    clamp_period, compute_score_history, compute_trends, ScoreHistory, ScorePoint, TrendPoint,
    WellnessTrends, DEFAULT_TREND_PERIOD_DAYS, MAX_TREND_PERIOD_DAYS,
};
