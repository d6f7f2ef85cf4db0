//! GetTrendsHandler - Wellness and sentiment over the last `period` days.

use std::sync::Arc;

use crate::domain::analytics::{clamp_period, compute_trends, WellnessTrends};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::journal::JournalError;
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct GetTrendsQuery {
    pub user_id: UserId,
    /// Raw requested period in days; normalized by the handler.
    pub period: Option<i64>,
}

pub struct GetTrendsHandler {
    repository: Arc<dyn JournalRepository>,
}

impl GetTrendsHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetTrendsQuery) -> Result<WellnessTrends, JournalError> {
        let period = clamp_period(query.period);
        let since = Timestamp::now().minus_days(i64::from(period));

        let entries = self
            .repository
            .find_created_between(&query.user_id, &since, None)
            .await?;

        Ok(compute_trends(period, &entries))
    }
}
