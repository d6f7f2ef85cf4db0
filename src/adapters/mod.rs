//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI-compatible completion client, entry analyzer, chat companion
//! - `auth` - Bearer token validation
//! - `http` - axum REST API
//! - `memory` - In-memory repositories
//! - `postgres` - PostgreSQL repositories

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
