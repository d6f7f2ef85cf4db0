//! Journal entry analysis handlers and the score history built from them.

mod analyze_entry;
mod get_score_history;

pub use analyze_entry::{
    AnalysisSource, AnalyzeEntryCommand, AnalyzeEntryHandler, AnalyzeEntryResult,
    ANALYSIS_TIMEOUT,
};
pub use get_score_history::{GetScoreHistoryHandler, GetScoreHistoryQuery};
