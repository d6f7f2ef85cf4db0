//! AnalyzeEntryHandler - Produces (or returns the cached) analysis of an entry.
//!
//! Flow:
//! 1. Load the entry for its owner
//! 2. A complete stored analysis is returned as-is, with no external call and no write
//! 3. Otherwise ask the external analyzer, bounded by a fixed timeout
//! 4. Any external failure (not configured, transport, timeout, unusable reply)
//!    falls back to the keyword heuristic
//! 5. Persist the new analysis stamped with the current time
//!
//! Only persistence failures reach the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::analysis::{
    evaluate, heuristic_analysis, missing_fields, AnalysisResult, AnalysisState, EntryAnalysis,
    ParsedAnalysis,
};
use crate::domain::foundation::{EntryId, Timestamp, UserId};
use crate::domain::journal::{JournalEntry, JournalError};
use crate::ports::{EntryAnalysisRequest, EntryAnalyzer, JournalRepository};

/// Upper bound on one external analysis call.
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(45);

#[derive(Debug, Clone)]
pub struct AnalyzeEntryCommand {
    pub user_id: UserId,
    pub entry_id: EntryId,
}

/// Where the returned analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Cached,
    External,
    Heuristic,
}

#[derive(Debug, Clone)]
pub struct AnalyzeEntryResult {
    pub entry_id: EntryId,
    pub analysis: EntryAnalysis,
    pub source: AnalysisSource,
}

pub struct AnalyzeEntryHandler {
    repository: Arc<dyn JournalRepository>,
    /// `None` when no API credential is configured.
    analyzer: Option<Arc<dyn EntryAnalyzer>>,
    timeout: Duration,
}

impl AnalyzeEntryHandler {
    pub fn new(
        repository: Arc<dyn JournalRepository>,
        analyzer: Option<Arc<dyn EntryAnalyzer>>,
    ) -> Self {
        Self {
            repository,
            analyzer,
            timeout: ANALYSIS_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: AnalyzeEntryCommand) -> Result<AnalyzeEntryResult, JournalError> {
        let entry = self
            .repository
            .find_by_id(&cmd.user_id, &cmd.entry_id)
            .await?
            .ok_or_else(|| JournalError::not_found(cmd.entry_id))?;

        match (evaluate(entry.analysis()), entry.analysis()) {
            (AnalysisState::Complete, Some(analysis)) => {
                debug!(entry_id = %cmd.entry_id, "Returning cached analysis");
                return Ok(AnalyzeEntryResult {
                    entry_id: cmd.entry_id,
                    analysis: analysis.clone(),
                    source: AnalysisSource::Cached,
                });
            }
            (AnalysisState::Stale, Some(analysis)) => {
                warn!(
                    entry_id = %cmd.entry_id,
                    missing = ?missing_fields(analysis),
                    "Stored analysis is incomplete, regenerating"
                );
            }
            _ => {}
        }

        let (result, source) = match self.external_analysis(&entry).await {
            Some(result) => (result, AnalysisSource::External),
            None => {
                info!(entry_id = %cmd.entry_id, "Using heuristic analysis");
                let result = heuristic_analysis(entry.title(), entry.content(), entry.mood());
                (result, AnalysisSource::Heuristic)
            }
        };

        let analyzed_at = Timestamp::now();
        let analysis = EntryAnalysis::from_result(result, analyzed_at);
        self.repository
            .update_analysis(&cmd.user_id, &cmd.entry_id, &analysis, &analyzed_at)
            .await
            .map_err(|e| match JournalError::from(e) {
                JournalError::NotFound(_) => JournalError::not_found(cmd.entry_id),
                other => other,
            })?;

        info!(
            entry_id = %cmd.entry_id,
            source = ?source,
            wellness_score = analysis.wellness_score,
            "Entry analyzed"
        );

        Ok(AnalyzeEntryResult {
            entry_id: cmd.entry_id,
            analysis,
            source,
        })
    }

    /// Returns `None` on any failure; the caller falls back.
    async fn external_analysis(&self, entry: &JournalEntry) -> Option<AnalysisResult> {
        let Some(analyzer) = self.analyzer.as_ref() else {
            debug!(entry_id = %entry.id(), "External analyzer not configured");
            return None;
        };

        let request = EntryAnalysisRequest {
            user_id: entry.user_id().clone(),
            title: entry.title().to_string(),
            content: entry.content().to_string(),
            mood: entry.mood(),
        };

        match tokio::time::timeout(self.timeout, analyzer.analyze(&request)).await {
            Ok(Ok(ParsedAnalysis::Parsed(result))) => Some(result),
            Ok(Ok(ParsedAnalysis::Unparseable(raw))) => {
                warn!(
                    entry_id = %entry.id(),
                    reply_len = raw.len(),
                    "Analyzer reply could not be parsed, falling back"
                );
                None
            }
            Ok(Err(error)) => {
                warn!(entry_id = %entry.id(), error = %error, "External analysis failed, falling back");
                None
            }
            Err(_) => {
                warn!(
                    entry_id = %entry.id(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "External analysis timed out, falling back"
                );
                None
            }
        }
    }
}
