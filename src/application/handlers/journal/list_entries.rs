//! ListEntriesHandler - Query handler for a filtered, paginated entry listing.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::domain::journal::{JournalEntry, JournalError};
use crate::ports::{EntryFilter, JournalRepository, PageRequest};

/// Query to list a user's entries.
#[derive(Debug, Clone)]
pub struct ListEntriesQuery {
    pub user_id: UserId,
    pub filter: EntryFilter,
    pub page: PageRequest,
}

/// Pagination block returned alongside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: u32,
    pub pages: u64,
    pub total: u64,
}

#[derive(Debug, Clone)]
pub struct EntryListing {
    pub entries: Vec<JournalEntry>,
    pub pagination: Pagination,
}

pub struct ListEntriesHandler {
    repository: Arc<dyn JournalRepository>,
}

impl ListEntriesHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListEntriesQuery) -> Result<EntryListing, JournalError> {
        let page = self
            .repository
            .list(&query.user_id, &query.filter, query.page)
            .await?;

        Ok(EntryListing {
            pagination: Pagination {
                current: query.page.page,
                pages: query.page.page_count(page.total),
                total: page.total,
            },
            entries: page.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryJournalRepository;
    use crate::domain::foundation::{EntryId, Timestamp};
    use crate::domain::journal::Mood;

    async fn seeded() -> Arc<InMemoryJournalRepository> {
        let repo = Arc::new(InMemoryJournalRepository::new());
        for i in 0..12 {
            let created = Timestamp::now().minus_days(i);
            let mood = if i % 2 == 0 { Mood::Happy } else { Mood::Sad };
            repo.insert(JournalEntry::reconstitute(
                EntryId::new(),
                UserId::new("user-1").unwrap(),
                format!("Day {}", i),
                "content".to_string(),
                mood,
                vec![if i < 3 { "work" } else { "home" }.to_string()],
                true,
                None,
                created,
                created,
            ))
            .await;
        }
        repo
    }

    #[tokio::test]
    async fn default_page_reports_pagination() {
        let handler = ListEntriesHandler::new(seeded().await);

        let listing = handler
            .handle(ListEntriesQuery {
                user_id: UserId::new("user-1").unwrap(),
                filter: EntryFilter::default(),
                page: PageRequest::default(),
            })
            .await
            .unwrap();

        assert_eq!(listing.entries.len(), 10);
        assert_eq!(listing.entries[0].title(), "Day 0");
        assert_eq!(
            listing.pagination,
            Pagination {
                current: 1,
                pages: 2,
                total: 12
            }
        );
    }

    #[tokio::test]
    async fn filters_by_mood_and_tag() {
        let handler = ListEntriesHandler::new(seeded().await);

        let listing = handler
            .handle(ListEntriesQuery {
                user_id: UserId::new("user-1").unwrap(),
                filter: EntryFilter {
                    mood: Some(Mood::Happy),
                    tags: vec!["work".to_string()],
                    ..Default::default()
                },
                page: PageRequest::default(),
            })
            .await
            .unwrap();

        let titles: Vec<_> = listing.entries.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["Day 0", "Day 2"]);
        assert_eq!(listing.pagination.total, 2);
    }

    #[tokio::test]
    async fn other_users_see_nothing() {
        let handler = ListEntriesHandler::new(seeded().await);

        let listing = handler
            .handle(ListEntriesQuery {
                user_id: UserId::new("someone-else").unwrap(),
                filter: EntryFilter::default(),
                page: PageRequest::default(),
            })
            .await
            .unwrap();

        assert!(listing.entries.is_empty());
        assert_eq!(listing.pagination.pages, 0);
    }
}
