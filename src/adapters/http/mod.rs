//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto/handlers/routes module; `router` wires them
//! together behind the auth middleware under `/api`.

pub mod analysis;
pub mod analytics;
pub mod chat;
pub mod health;
pub mod journal;
pub mod middleware;
pub mod response;
pub mod router;

pub use response::{ApiError, ApiJson, ApiResponse, ErrorPolicy, MessageResponse};
pub use router::{
    api_router, min_request_timeout, ApiDependencies, HttpSettings, FALLBACK_HEADROOM,
};
