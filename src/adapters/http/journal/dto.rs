//! HTTP DTOs for journal endpoints.
//!
//! Request bodies keep every field optional so that missing input is
//! reported with the journal's own validation messages rather than a
//! deserializer error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::response::ApiError;
use crate::application::handlers::journal::{
    CreateEntryCommand, EntryListing, ListEntriesQuery, Pagination,
};
use crate::domain::analysis::EntryAnalysis;
use crate::domain::foundation::{EntryId, Timestamp, UserId};
use crate::domain::journal::{EntryUpdate, JournalEntry, Mood};
use crate::ports::{EntryFilter, PageRequest};

pub const MISSING_FIELDS_MESSAGE: &str = "Please provide title, content, and mood";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_private: Option<bool>,
}

impl CreateEntryRequest {
    pub fn into_command(self, user_id: UserId) -> Result<CreateEntryCommand, ApiError> {
        let (Some(title), Some(content), Some(mood)) = (
            non_empty(self.title),
            non_empty(self.content),
            non_empty(self.mood),
        ) else {
            return Err(ApiError::bad_request(MISSING_FIELDS_MESSAGE));
        };

        Ok(CreateEntryCommand {
            user_id,
            title,
            content,
            mood: parse_mood(&mood)?,
            tags: self.tags,
            is_private: self.is_private,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_private: Option<bool>,
}

impl UpdateEntryRequest {
    pub fn into_update(self) -> Result<EntryUpdate, ApiError> {
        Ok(EntryUpdate {
            title: self.title,
            content: self.content,
            mood: self.mood.as_deref().map(parse_mood).transpose()?,
            tags: self.tags,
            is_private: self.is_private,
        })
    }
}

/// Query string for `GET /journal`. Numbers are parsed leniently: anything
/// unparseable falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub mood: Option<String>,
    /// Comma separated; matches entries carrying any of them.
    pub tags: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListEntriesParams {
    pub fn into_query(self, user_id: UserId) -> Result<ListEntriesQuery, ApiError> {
        let page = PageRequest::new(lenient_u32(self.page), lenient_u32(self.limit));

        let tags = self
            .tags
            .map(|raw| {
                raw.split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let filter = EntryFilter {
            mood: non_empty(self.mood).as_deref().map(parse_mood).transpose()?,
            tags,
            start_date: non_empty(self.start_date)
                .as_deref()
                .map(|d| parse_date("startDate", d))
                .transpose()?,
            end_date: non_empty(self.end_date)
                .as_deref()
                .map(|d| parse_date("endDate", d))
                .transpose()?,
        };

        Ok(ListEntriesQuery {
            user_id,
            filter,
            page,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn lenient_u32(value: Option<String>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_mood(raw: &str) -> Result<Mood, ApiError> {
    raw.parse::<Mood>()
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(field: &str, raw: &str) -> Result<Timestamp, ApiError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Timestamp::from_datetime(naive.and_utc()))
        .ok_or_else(|| ApiError::bad_request(format!("Invalid {}: {}", field, raw)))
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: EntryId,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<EntryAnalysis>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&JournalEntry> for EntryResponse {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            id: *entry.id(),
            user_id: entry.user_id().to_string(),
            title: entry.title().to_string(),
            content: entry.content().to_string(),
            mood: entry.mood(),
            tags: entry.tags().to_vec(),
            is_private: entry.is_private(),
            analysis: entry.analysis().cloned(),
            created_at: *entry.created_at(),
            updated_at: *entry.updated_at(),
        }
    }
}

/// `{ success, data: [...], pagination: { current, pages, total } }`
#[derive(Debug, Clone, Serialize)]
pub struct EntryListResponse {
    pub success: bool,
    pub data: Vec<EntryResponse>,
    pub pagination: Pagination,
}

impl From<EntryListing> for EntryListResponse {
    fn from(listing: EntryListing) -> Self {
        Self {
            success: true,
            data: listing.entries.iter().map(EntryResponse::from).collect(),
            pagination: listing.pagination,
        }
    }
}
