#![forbid(unsafe_code)]

//! Recurring event date generation.
//!
//! This crate provides:
//! - Recurrence rule types (weekly, day interval, monthly by position, monthly by day)
//! - Form-style rule drafts with defaulting and validation
//! - Occurrence generation and live previews
//! - Human-readable rule summaries
//! - Materialization of occurrences into event rows (CSV / JSONL export)

pub mod types;
pub mod error;
pub mod calendar;
pub mod config;
pub mod logging;
pub mod draft;
pub mod generate;
pub mod describe;
pub mod schedule;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use draft::RuleDraft;
pub use generate::{generate, preview, Preview};
pub use describe::{describe, describe_window};
pub use schedule::{schedule, EventTemplate, ScheduledEvent, Series};
