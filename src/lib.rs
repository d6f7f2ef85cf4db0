//! Wellness Journal - mood journaling backend
//!
//! Users keep mood-tagged journal entries, ask for an analysis of each
//! entry (sentiment, emotions, wellness score, suggestions) and talk to a
//! supportive companion in chat sessions. Analyses and companion replies
//! come from an external language model when one is configured and degrade
//! to deterministic local fallbacks when it is not or when it fails.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
