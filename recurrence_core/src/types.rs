//! Core domain types for recurring events.
//!
//! This module defines the strongly typed rule model:
//! - Recurrence patterns (one variant per kind, carrying only its own fields)
//! - Ordinal positions within a month
//! - The complete rule (pattern plus date window)
//! - Sunday-first weekday numbering used by forms and label tables

use crate::{calendar, Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

// ============================================================================
// Weekday Numbering
// ============================================================================

/// Weekdays indexed the way forms number them (0 = Sunday)
const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Map a Sunday-first index (0..=6) to a weekday
pub fn weekday_from_index(index: u32) -> Option<Weekday> {
    SUNDAY_FIRST.get(index as usize).copied()
}

/// Sunday-first index (0..=6) of a weekday
pub fn weekday_index(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

// ============================================================================
// Month Position
// ============================================================================

/// Ordinal occurrence of a weekday within a month
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MonthPosition {
    First,
    Second,
    Third,
    Fourth,
    /// The final occurrence, whether it is the 4th or the 5th
    Last,
}

impl MonthPosition {
    /// Decode the 1..=5 form encoding (5 = last)
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MonthPosition::First),
            2 => Some(MonthPosition::Second),
            3 => Some(MonthPosition::Third),
            4 => Some(MonthPosition::Fourth),
            5 => Some(MonthPosition::Last),
            _ => None,
        }
    }

    /// The 1..=5 form encoding
    pub fn number(self) -> u8 {
        match self {
            MonthPosition::First => 1,
            MonthPosition::Second => 2,
            MonthPosition::Third => 3,
            MonthPosition::Fourth => 4,
            MonthPosition::Last => 5,
        }
    }
}

// ============================================================================
// Day of Month
// ============================================================================

/// A day of the month in 1..=31
///
/// Months shorter than the stored day use their last day instead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayOfMonth(u32);

impl DayOfMonth {
    pub fn new(day: u32) -> Option<Self> {
        (1..=31).contains(&day).then_some(DayOfMonth(day))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DayOfMonth {
    type Error = Error;

    fn try_from(day: u32) -> Result<Self> {
        DayOfMonth::new(day)
            .ok_or_else(|| Error::InvalidRule(format!("dayOfMonth must be 1-31, got {}", day)))
    }
}

impl From<DayOfMonth> for u32 {
    fn from(day: DayOfMonth) -> Self {
        day.0
    }
}

impl fmt::Display for DayOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Rule Kinds and Patterns
// ============================================================================

/// Discriminant of a recurrence pattern, as named in form input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Weekly,
    DayInterval,
    MonthlyByPosition,
    MonthlyByDay,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Weekly => "WEEKLY",
            RuleKind::DayInterval => "DAY_INTERVAL",
            RuleKind::MonthlyByPosition => "MONTHLY_BY_POSITION",
            RuleKind::MonthlyByDay => "MONTHLY_BY_DAY",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "WEEKLY" => Ok(RuleKind::Weekly),
            "DAY_INTERVAL" => Ok(RuleKind::DayInterval),
            "MONTHLY_BY_POSITION" => Ok(RuleKind::MonthlyByPosition),
            "MONTHLY_BY_DAY" => Ok(RuleKind::MonthlyByDay),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

/// How an event repeats
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pattern {
    /// Every week on the given weekday
    Weekly { weekday: Weekday },
    /// Every `interval_days` days, starting on the start date
    DayInterval { interval_days: NonZeroU32 },
    /// The Nth (or last) given weekday of each month
    MonthlyByPosition {
        position: MonthPosition,
        weekday: Weekday,
    },
    /// A fixed day of each month, clamped to the month's length
    MonthlyByDay { day_of_month: DayOfMonth },
}

impl Pattern {
    pub fn kind(&self) -> RuleKind {
        match self {
            Pattern::Weekly { .. } => RuleKind::Weekly,
            Pattern::DayInterval { .. } => RuleKind::DayInterval,
            Pattern::MonthlyByPosition { .. } => RuleKind::MonthlyByPosition,
            Pattern::MonthlyByDay { .. } => RuleKind::MonthlyByDay,
        }
    }
}

// ============================================================================
// Recurrence Rule
// ============================================================================

/// A complete recurrence rule: a pattern applied over an inclusive date window
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    #[serde(flatten)]
    pub pattern: Pattern,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(pattern: Pattern, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            pattern,
            start_date,
            end_date,
        }
    }

    /// Upper bound actually used for generation
    ///
    /// The explicit end date if one was given, otherwise December 31st of
    /// the year containing the start date.
    pub fn effective_end(&self) -> NaiveDate {
        self.end_date
            .unwrap_or_else(|| calendar::last_day_of_year(self.start_date.year()))
    }

    /// Whether the window contains no dates at all
    pub fn is_empty_window(&self) -> bool {
        self.start_date > self.effective_end()
    }

    pub fn kind(&self) -> RuleKind {
        self.pattern.kind()
    }
}
