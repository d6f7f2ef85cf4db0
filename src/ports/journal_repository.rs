//! Journal entry repository port.
//!
//! Every query is scoped by the owning user. An entry belonging to someone
//! else is indistinguishable from one that does not exist.

use async_trait::async_trait;

use crate::domain::analysis::EntryAnalysis;
use crate::domain::foundation::{DomainError, EntryId, Timestamp, UserId};
use crate::domain::journal::{JournalEntry, Mood};

/// Default page size for entry listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filters for listing entries. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub mood: Option<Mood>,
    /// Matches entries carrying any of these tags.
    pub tags: Vec<String>,
    /// Inclusive lower bound on `created_at`.
    pub start_date: Option<Timestamp>,
    /// Inclusive upper bound on `created_at`.
    pub end_date: Option<Timestamp>,
}

impl EntryFilter {
    /// Returns true if `entry` passes every filter.
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(mood) = self.mood {
            if entry.mood() != mood {
                return false;
            }
        }
        if !self.tags.is_empty() && !entry.tags().iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if let Some(start) = &self.start_date {
            if entry.created_at().is_before(start) {
                return false;
            }
        }
        if let Some(end) = &self.end_date {
            if entry.created_at().is_after(end) {
                return false;
            }
        }
        true
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Normalizes raw query values: page >= 1, limit in 1..=100.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.filter(|p| *p >= 1).unwrap_or(1),
            limit: limit
                .filter(|l| *l >= 1)
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Number of pages needed for `total` items.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of entries plus the total matching count.
#[derive(Debug, Clone)]
pub struct EntryPage {
    pub entries: Vec<JournalEntry>,
    pub total: u64,
}

/// Repository port for journal entries.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Saves a new entry.
    async fn save(&self, entry: &JournalEntry) -> Result<(), DomainError>;

    /// Writes the user-editable fields and `updated_at`. Leaves `analysis` alone.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if no such entry exists for the owner
    async fn update(&self, entry: &JournalEntry) -> Result<(), DomainError>;

    /// Writes only `analysis` and `updated_at`.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if the entry was deleted meanwhile
    async fn update_analysis(
        &self,
        user_id: &UserId,
        id: &EntryId,
        analysis: &EntryAnalysis,
        updated_at: &Timestamp,
    ) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &EntryId,
    ) -> Result<Option<JournalEntry>, DomainError>;

    /// Deletes an entry. Returns false if nothing was deleted.
    async fn delete(&self, user_id: &UserId, id: &EntryId) -> Result<bool, DomainError>;

    /// Lists entries newest first.
    async fn list(
        &self,
        user_id: &UserId,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> Result<EntryPage, DomainError>;

    /// Counts entries, optionally only those created at or after `since`.
    async fn count(&self, user_id: &UserId, since: Option<&Timestamp>) -> Result<u64, DomainError>;

    /// Entry count per mood. Moods with no entries may be omitted.
    async fn mood_counts(&self, user_id: &UserId) -> Result<Vec<(Mood, u64)>, DomainError>;

    /// Wellness scores of every analyzed entry.
    async fn wellness_scores(&self, user_id: &UserId) -> Result<Vec<u8>, DomainError>;

    /// Entry counts per UTC calendar day (`YYYY-MM-DD`) for entries created
    /// at or after `since`, oldest day first. Days without entries are absent.
    async fn daily_counts(
        &self,
        user_id: &UserId,
        since: &Timestamp,
    ) -> Result<Vec<(String, u64)>, DomainError>;

    /// Entries created in `[from, until)`, oldest first. `until = None` means now.
    async fn find_created_between(
        &self,
        user_id: &UserId,
        from: &Timestamp,
        until: Option<&Timestamp>,
    ) -> Result<Vec<JournalEntry>, DomainError>;
}
