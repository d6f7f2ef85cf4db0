//! Analytics query handlers.

mod get_insights;
mod get_overview;
mod get_trends;

pub use get_insights::{GetInsightsHandler, GetInsightsQuery};
pub use get_overview::{GetOverviewHandler, GetOverviewQuery};
pub use get_trends::{GetTrendsHandler, GetTrendsQuery};
