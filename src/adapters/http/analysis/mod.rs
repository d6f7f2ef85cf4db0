//! HTTP adapter for entry analysis.

mod dto;
mod handlers;
mod routes;

pub use dto::AnalysisResponse;
pub use handlers::AnalysisHandlers;
pub use routes::analysis_routes;
