//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates domain operations and coordinates between ports. Writes
//! (create, update, delete, analyze, send) and reads (get, list, analytics)
//! are separate handlers.

pub mod handlers;

pub use handlers::*;
