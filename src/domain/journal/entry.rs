//! Journal entry aggregate.
//!
//! An entry is owned by exactly one user and embeds at most one analysis
//! document. Timestamps are assigned by the methods that mutate the entry.

use crate::domain::analysis::EntryAnalysis;
use crate::domain::foundation::{EntryId, Timestamp, UserId, ValidationError};

use super::Mood;

/// Maximum length for an entry title, after trimming.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum length for entry content.
pub const MAX_CONTENT_LENGTH: usize = 5000;

/// Partial update applied by [`JournalEntry::apply_update`].
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
    pub is_private: Option<bool>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.mood.is_none()
            && self.tags.is_none()
            && self.is_private.is_none()
    }
}

/// A mood-tagged journal entry.
///
/// # Invariants
///
/// - `title` is trimmed, 1-100 characters
/// - `content` is 1-5000 characters and not blank
/// - `tags` are trimmed, lowercased and never empty strings
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    id: EntryId,
    user_id: UserId,
    title: String,
    content: String,
    mood: Mood,
    tags: Vec<String>,
    is_private: bool,
    analysis: Option<EntryAnalysis>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl JournalEntry {
    /// Creates a new entry with no analysis.
    ///
    /// `is_private` defaults to true.
    pub fn new(
        id: EntryId,
        user_id: UserId,
        title: &str,
        content: String,
        mood: Mood,
        tags: Vec<String>,
        is_private: Option<bool>,
    ) -> Result<Self, ValidationError> {
        let title = Self::validate_title(title)?;
        Self::validate_content(&content)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            title,
            content,
            mood,
            tags: normalize_tags(tags),
            is_private: is_private.unwrap_or(true),
            analysis: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes an entry from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: EntryId,
        user_id: UserId,
        title: String,
        content: String,
        mood: Mood,
        tags: Vec<String>,
        is_private: bool,
        analysis: Option<EntryAnalysis>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            content,
            mood,
            tags,
            is_private,
            analysis,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn analysis(&self) -> Option<&EntryAnalysis> {
        self.analysis.as_ref()
    }

    /// Stored wellness score, if the entry has been analyzed.
    pub fn wellness_score(&self) -> Option<u8> {
        self.analysis.as_ref().and_then(|a| a.wellness_score)
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if the given user owns this entry.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial update. Nothing changes if any field is invalid.
    pub fn apply_update(&mut self, update: EntryUpdate) -> Result<(), ValidationError> {
        let title = update
            .title
            .as_deref()
            .map(Self::validate_title)
            .transpose()?;
        if let Some(content) = &update.content {
            Self::validate_content(content)?;
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(mood) = update.mood {
            self.mood = mood;
        }
        if let Some(tags) = update.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(is_private) = update.is_private {
            self.is_private = is_private;
        }
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        let now = Timestamp::now();
        if now.is_after(&self.updated_at) {
            self.updated_at = now;
        }
    }

    fn validate_title(title: &str) -> Result<String, ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH));
        }
        Ok(trimmed.to_string())
    }

    fn validate_content(content: &str) -> Result<(), ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(ValidationError::too_long("content", MAX_CONTENT_LENGTH));
        }
        Ok(())
    }
}

/// Trims and lowercases tags, dropping empty ones.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn entry() -> JournalEntry {
        JournalEntry::new(
            EntryId::new(),
            user(),
            "  Morning walk  ",
            "Felt calm by the river.".to_string(),
            Mood::Happy,
            vec![" Outdoors ".to_string(), "".to_string(), "CALM".to_string()],
            None,
        )
        .unwrap()
    }

    #[test]
    fn new_entry_normalizes_title_and_tags() {
        let e = entry();
        assert_eq!(e.title(), "Morning walk");
        assert_eq!(e.tags(), &["outdoors".to_string(), "calm".to_string()]);
    }

    #[test]
    fn new_entry_defaults_to_private_without_analysis() {
        let e = entry();
        assert!(e.is_private());
        assert!(e.analysis().is_none());
        assert_eq!(e.created_at(), e.updated_at());
    }

    #[test]
    fn rejects_blank_title() {
        let err = JournalEntry::new(
            EntryId::new(),
            user(),
            "   ",
            "content".to_string(),
            Mood::Neutral,
            vec![],
            None,
        )
        .unwrap_err();
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn rejects_title_over_limit_but_accepts_exact_limit() {
        let exact = "a".repeat(MAX_TITLE_LENGTH);
        assert!(JournalEntry::new(
            EntryId::new(),
            user(),
            &exact,
            "c".to_string(),
            Mood::Neutral,
            vec![],
            None
        )
        .is_ok());

        let long = "a".repeat(MAX_TITLE_LENGTH + 1);
        let err = JournalEntry::new(
            EntryId::new(),
            user(),
            &long,
            "c".to_string(),
            Mood::Neutral,
            vec![],
            None,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::too_long("title", MAX_TITLE_LENGTH));
    }

    #[test]
    fn rejects_content_over_limit() {
        let err = JournalEntry::new(
            EntryId::new(),
            user(),
            "t",
            "x".repeat(MAX_CONTENT_LENGTH + 1),
            Mood::Neutral,
            vec![],
            None,
        )
        .unwrap_err();
        assert_eq!(err.field(), "content");
    }

    #[test]
    fn apply_update_changes_only_given_fields() {
        let mut e = entry();
        e.apply_update(EntryUpdate {
            mood: Some(Mood::Sad),
            is_private: Some(false),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(e.mood(), Mood::Sad);
        assert!(!e.is_private());
        assert_eq!(e.title(), "Morning walk");
        assert!(!e.updated_at().is_before(e.created_at()));
    }

    #[test]
    fn invalid_update_leaves_entry_untouched() {
        let mut e = entry();
        let before = e.clone();
        let result = e.apply_update(EntryUpdate {
            mood: Some(Mood::VerySad),
            content: Some("   ".to_string()),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(e, before);
    }

    #[test]
    fn ownership_check() {
        let e = entry();
        assert!(e.is_owner(&user()));
        assert!(!e.is_owner(&UserId::new("someone-else").unwrap()));
    }
}
