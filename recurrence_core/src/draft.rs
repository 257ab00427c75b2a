//! Form-shaped rule input and its normalization.
//!
//! An event form submits every rule field regardless of the selected kind,
//! with numbers possibly missing and dates as `YYYY-MM-DD` strings. A
//! [`RuleDraft`] captures that loose shape; [`RuleDraft::normalize`] fills
//! defaults for the active kind, range-checks what it uses, and produces a
//! typed [`RecurrenceRule`].

use crate::config::RuleDefaults;
use crate::{
    weekday_from_index, DayOfMonth, Error, MonthPosition, Pattern, RecurrenceRule, Result,
    RuleKind,
};
use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loose rule input as submitted by an event form
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    pub kind: String,

    #[serde(default)]
    pub weekday: Option<i64>,

    #[serde(default, alias = "interval_days")]
    pub interval_days: Option<i64>,

    #[serde(default, alias = "month_position")]
    pub month_position: Option<i64>,

    #[serde(default, alias = "day_of_month")]
    pub day_of_month: Option<i64>,

    #[serde(alias = "start_date")]
    pub start_date: String,

    /// Absent or empty means "end of the start year"
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
}

impl RuleDraft {
    /// Parse a draft from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a draft from a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a draft from a `.toml` or JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml(&contents)
        } else {
            Self::from_json(&contents)
        }
    }

    /// Fill defaults and validate into a typed rule
    ///
    /// Only the fields used by the selected kind are read. A start date
    /// after the end date is accepted here; generation yields nothing.
    ///
    /// # Errors
    /// - `UnknownKind` when `kind` names no known pattern
    /// - `InvalidRule` when an active field is out of range
    /// - `InvalidDate` when a date is not `YYYY-MM-DD`
    pub fn normalize(&self, defaults: &RuleDefaults) -> Result<RecurrenceRule> {
        let kind: RuleKind = self.kind.parse()?;
        let start_date = parse_date("startDate", &self.start_date)?;
        let end_date = match self.end_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(parse_date("endDate", s)?),
        };

        let pattern = match kind {
            RuleKind::Weekly => Pattern::Weekly {
                weekday: self.resolve_weekday(defaults)?,
            },
            RuleKind::DayInterval => Pattern::DayInterval {
                interval_days: self.resolve_interval(defaults)?,
            },
            RuleKind::MonthlyByPosition => Pattern::MonthlyByPosition {
                position: self.resolve_position(defaults)?,
                weekday: self.resolve_weekday(defaults)?,
            },
            RuleKind::MonthlyByDay => Pattern::MonthlyByDay {
                day_of_month: self.resolve_day_of_month(defaults)?,
            },
        };

        tracing::debug!(
            "Normalized {} rule starting {} (end {:?})",
            kind,
            start_date,
            end_date
        );

        Ok(RecurrenceRule::new(pattern, start_date, end_date))
    }

    fn resolve_weekday(&self, defaults: &RuleDefaults) -> Result<Weekday> {
        let value = self.weekday.unwrap_or(defaults.weekday);
        u32::try_from(value)
            .ok()
            .and_then(weekday_from_index)
            .ok_or_else(|| {
                Error::InvalidRule(format!("weekday must be 0-6 (0 = Sunday), got {}", value))
            })
    }

    fn resolve_interval(&self, defaults: &RuleDefaults) -> Result<NonZeroU32> {
        let value = self.interval_days.unwrap_or(defaults.interval_days);
        if value < 1 {
            return Err(Error::InvalidRule(format!(
                "intervalDays must be at least 1, got {}",
                value
            )));
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| Error::InvalidRule(format!("intervalDays is too large: {}", value)))
    }

    fn resolve_position(&self, defaults: &RuleDefaults) -> Result<MonthPosition> {
        let value = self.month_position.unwrap_or(defaults.month_position);
        MonthPosition::from_number(value).ok_or_else(|| {
            Error::InvalidRule(format!(
                "monthPosition must be 1-4, or 5 for last, got {}",
                value
            ))
        })
    }

    fn resolve_day_of_month(&self, defaults: &RuleDefaults) -> Result<DayOfMonth> {
        let value = self.day_of_month.unwrap_or(defaults.day_of_month);
        u32::try_from(value)
            .ok()
            .and_then(DayOfMonth::new)
            .ok_or_else(|| Error::InvalidRule(format!("dayOfMonth must be 1-31, got {}", value)))
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("{} {:?}: {}", field, value, e)))
}
