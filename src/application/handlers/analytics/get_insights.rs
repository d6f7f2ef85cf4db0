//! GetInsightsHandler - Compares the last week with the three weeks before it.

use std::sync::Arc;

use crate::domain::analytics::{
    generate_insights, Insight, COMPARISON_WINDOW_DAYS, RECENT_WINDOW_DAYS,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::journal::JournalError;
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct GetInsightsQuery {
    pub user_id: UserId,
}

pub struct GetInsightsHandler {
    repository: Arc<dyn JournalRepository>,
}

impl GetInsightsHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetInsightsQuery) -> Result<Vec<Insight>, JournalError> {
        let now = Timestamp::now();
        let recent_start = now.minus_days(RECENT_WINDOW_DAYS);
        let older_start = now.minus_days(COMPARISON_WINDOW_DAYS);
        let user = &query.user_id;

        let (recent, older) = futures::try_join!(
            self.repository.find_created_between(user, &recent_start, None),
            self.repository
                .find_created_between(user, &older_start, Some(&recent_start)),
        )?;

        let insights = generate_insights(&recent, &older);
        tracing::debug!(
            recent = recent.len(),
            older = older.len(),
            insights = insights.len(),
            "Insights generated"
        );
        Ok(insights)
    }
}
