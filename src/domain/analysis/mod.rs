//! Analysis module - pure services behind the journal analysis pipeline.
//!
//! # Components
//!
//! - `values` - Sentiment, emotions, insights, and the stored `EntryAnalysis`
//! - `completeness` - Classifies a stored analysis as complete, stale or absent
//! - `heuristic` - Deterministic keyword-counting fallback analyzer
//! - `payload` - Tolerant parser for the external model's JSON reply
//!
//! Nothing here performs I/O. The orchestration (cache check, external call,
//! fallback, persistence) lives in `application::handlers::analysis`.

mod completeness;
pub mod heuristic;
mod payload;
mod values;

pub use completeness::{evaluate, missing_fields, AnalysisState};
pub use heuristic::{analyze as heuristic_analysis, wellness_score_for};
pub use payload::{parse_analysis_payload, ParsedAnalysis};
pub use values::{
    AnalysisInsights, AnalysisResult, EmotionScore, EntryAnalysis, Sentiment, SentimentLabel,
    NEGATIVE_LABEL_THRESHOLD, POSITIVE_LABEL_THRESHOLD,
};
