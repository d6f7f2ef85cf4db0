//! HTTP adapter for journal analytics.

mod dto;
mod handlers;
mod routes;

pub use dto::{InsightsResponse, TrendsParams};
pub use handlers::AnalyticsHandlers;
pub use routes::analytics_routes;
