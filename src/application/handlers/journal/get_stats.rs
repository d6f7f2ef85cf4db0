//! GetJournalStatsHandler - Totals, mood counts and the last week's activity.

use std::sync::Arc;

use crate::domain::analytics::{compute_journal_stats, JournalStats, RECENT_ACTIVITY_DAYS};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::journal::JournalError;
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct GetJournalStatsQuery {
    pub user_id: UserId,
}

pub struct GetJournalStatsHandler {
    repository: Arc<dyn JournalRepository>,
}

impl GetJournalStatsHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetJournalStatsQuery) -> Result<JournalStats, JournalError> {
        let now = Timestamp::now();
        let month_start = now.start_of_month();
        let week_ago = now.minus_days(RECENT_ACTIVITY_DAYS);
        let user = &query.user_id;

        let (total, this_month, moods, days) = futures::try_join!(
            self.repository.count(user, None),
            self.repository.count(user, Some(&month_start)),
            self.repository.mood_counts(user),
            self.repository.daily_counts(user, &week_ago),
        )?;

        Ok(compute_journal_stats(total, this_month, &moods, &days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryJournalRepository;
    use crate::application::handlers::test_support::FailingJournalRepository;
    use crate::domain::foundation::EntryId;
    use crate::domain::journal::{JournalEntry, Mood};

    fn entry(owner: &str, mood: Mood, days_ago: i64) -> JournalEntry {
        let created = Timestamp::now().minus_days(days_ago);
        JournalEntry::reconstitute(
            EntryId::new(),
            UserId::new(owner).unwrap(),
            "t".to_string(),
            "c".to_string(),
            mood,
            vec![],
            true,
            None,
            created,
            created,
        )
    }

    fn query() -> GetJournalStatsQuery {
        GetJournalStatsQuery {
            user_id: UserId::new("user-1").unwrap(),
        }
    }

    #[tokio::test]
    async fn counts_recent_activity_per_day() {
        let repo = Arc::new(InMemoryJournalRepository::new());
        repo.insert(entry("user-1", Mood::Happy, 0)).await;
        repo.insert(entry("user-1", Mood::Happy, 2)).await;
        repo.insert(entry("user-1", Mood::Sad, 2)).await;
        repo.insert(entry("user-1", Mood::Neutral, 40)).await;
        repo.insert(entry("user-2", Mood::Sad, 0)).await;
        let handler = GetJournalStatsHandler::new(repo);

        let stats = handler.handle(query()).await.unwrap();

        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.mood_distribution.len(), 3);
        assert_eq!(stats.recent_activity.len(), 2);
        assert_eq!(stats.recent_activity[0].date, Timestamp::now().minus_days(2).date_string());
        assert_eq!(stats.recent_activity[0].count, 2);
        assert_eq!(stats.recent_activity[1].count, 1);
    }

    #[tokio::test]
    async fn empty_journal_has_no_activity() {
        let handler = GetJournalStatsHandler::new(Arc::new(InMemoryJournalRepository::new()));

        let stats = handler.handle(query()).await.unwrap();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.entries_this_month, 0);
        assert!(stats.mood_distribution.is_empty());
        assert!(stats.recent_activity.is_empty());
    }

    #[tokio::test]
    async fn repository_failure_propagates() {
        let handler = GetJournalStatsHandler::new(Arc::new(FailingJournalRepository));
        let err = handler.handle(query()).await.unwrap_err();
        assert!(matches!(err, JournalError::Infrastructure(_)));
    }
}
