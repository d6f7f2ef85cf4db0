//! Journal module - mood-tagged entries and their embedded analysis.

mod entry;
mod errors;
mod mood;

pub use entry::{normalize_tags, EntryUpdate, JournalEntry, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
pub use errors::JournalError;
pub use mood::Mood;
