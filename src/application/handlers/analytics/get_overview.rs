//! GetOverviewHandler - Totals, monthly activity, wellness and mood mix.

use std::sync::Arc;

use crate::domain::analytics::{compute_overview, AnalyticsOverview};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::journal::JournalError;
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct GetOverviewQuery {
    pub user_id: UserId,
}

pub struct GetOverviewHandler {
    repository: Arc<dyn JournalRepository>,
}

impl GetOverviewHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetOverviewQuery) -> Result<AnalyticsOverview, JournalError> {
        let month_start = Timestamp::now().start_of_month();
        let user = &query.user_id;

        let (total, this_month, scores, moods) = futures::try_join!(
            self.repository.count(user, None),
            self.repository.count(user, Some(&month_start)),
            self.repository.wellness_scores(user),
            self.repository.mood_counts(user),
        )?;

        Ok(compute_overview(total, this_month, &scores, &moods))
    }
}
