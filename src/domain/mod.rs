//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, identity, errors)
//! - `journal` - Journal entry aggregate and mood scale
//! - `analysis` - Analysis values, completeness rules, heuristic, payload parsing
//! - `chat` - Companion chat sessions and fallback replies
//! - `analytics` - Overview, trend and insight calculators

pub mod analysis;
pub mod analytics;
pub mod chat;
pub mod foundation;
pub mod journal;
