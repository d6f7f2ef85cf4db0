//! HTTP DTOs for analytics endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::analytics::Insight;

/// `?period=` in days. Unparseable values fall back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendsParams {
    pub period: Option<String>,
}

impl TrendsParams {
    pub fn period(&self) -> Option<i64> {
        self.period.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

/// `data` of `GET /analytics/insights`.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
}

impl From<Vec<Insight>> for InsightsResponse {
    fn from(insights: Vec<Insight>) -> Self {
        Self { insights }
    }
}
