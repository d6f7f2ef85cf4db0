//! HTTP DTOs for analysis endpoints.

use serde::Serialize;

use crate::application::handlers::analysis::AnalyzeEntryResult;
use crate::domain::analysis::EntryAnalysis;
use crate::domain::foundation::EntryId;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub entry_id: EntryId,
    pub analysis: EntryAnalysis,
}

impl From<AnalyzeEntryResult> for AnalysisResponse {
    fn from(result: AnalyzeEntryResult) -> Self {
        Self {
            entry_id: result.entry_id,
            analysis: result.analysis,
        }
    }
}
