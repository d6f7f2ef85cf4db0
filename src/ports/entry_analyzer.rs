//! External entry analyzer port.
//!
//! An `EntryAnalyzer` asks a hosted model to analyze one journal entry and
//! returns the tagged parse of its reply. Transport failures are errors;
//! a reply that arrives but cannot be used is `ParsedAnalysis::Unparseable`.

use async_trait::async_trait;

use crate::domain::analysis::ParsedAnalysis;
use crate::domain::foundation::UserId;
use crate::domain::journal::Mood;

use super::AIError;

/// What the analyzer sees of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAnalysisRequest {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub mood: Mood,
}

#[async_trait]
pub trait EntryAnalyzer: Send + Sync {
    async fn analyze(&self, request: &EntryAnalysisRequest) -> Result<ParsedAnalysis, AIError>;
}
