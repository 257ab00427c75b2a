//! Turning occurrences into concrete event rows.
//!
//! The engine never stores anything itself: a [`Series`] is plain data that
//! a caller bulk-inserts wherever its events live.

use crate::{describe, generate, Error, RecurrenceRule, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fields shared by every event of a recurring series
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventTemplate {
    pub title: String,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Check the template is usable for every occurrence
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Template("title must not be empty".into()));
        }

        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                return Err(Error::Template(format!(
                    "end time {} is before start time {}",
                    end.format("%H:%M"),
                    start.format("%H:%M")
                )));
            }
        }

        Ok(())
    }
}

/// One concrete event on one occurrence date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub series_id: Uuid,
    /// 1-based position within the series
    pub sequence: usize,
    pub date: NaiveDate,
    pub title: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// All events materialized from one rule
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Series {
    pub series_id: Uuid,
    pub summary: String,
    pub events: Vec<ScheduledEvent>,
}

/// Materialize one event per occurrence of `rule`
///
/// Every event shares a freshly generated series id so that callers can
/// later find the rows that came from the same rule.
pub fn schedule(rule: &RecurrenceRule, template: &EventTemplate) -> Result<Series> {
    template.validate()?;

    let series_id = Uuid::new_v4();
    let events: Vec<ScheduledEvent> = generate(rule)
        .into_iter()
        .enumerate()
        .map(|(i, date)| ScheduledEvent {
            series_id,
            sequence: i + 1,
            date,
            title: template.title.clone(),
            start_time: template.start_time,
            end_time: template.end_time,
            location: template.location.clone(),
            description: template.description.clone(),
        })
        .collect();

    tracing::info!(
        "Scheduled {} events for \"{}\" (series {})",
        events.len(),
        template.title,
        series_id
    );

    Ok(Series {
        series_id,
        summary: describe(rule),
        events,
    })
}
