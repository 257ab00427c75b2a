//! Occurrence generation.
//!
//! Every generator produces dates in ascending order without duplicates,
//! all within `[start_date, effective_end]`. Work is bounded by the number
//! of weeks, steps, or months in the window.

use crate::calendar::{
    days_in_month, last_weekday_of_month, months_between, next_weekday_on_or_after,
    nth_weekday_of_month,
};
use crate::{describe, DayOfMonth, MonthPosition, Pattern, RecurrenceRule};
use chrono::{Days, NaiveDate, Weekday};
use serde::Serialize;

/// Compute every occurrence of a rule within its window
///
/// Returns an empty list when the start date is after the effective end
/// date. Calling this repeatedly with the same rule yields the same dates.
pub fn generate(rule: &RecurrenceRule) -> Vec<NaiveDate> {
    let start = rule.start_date;
    let end = rule.effective_end();

    if start > end {
        tracing::debug!("Start {} is after end {}, no occurrences", start, end);
        return Vec::new();
    }

    let dates = match rule.pattern {
        Pattern::Weekly { weekday } => weekly(start, end, weekday),
        Pattern::DayInterval { interval_days } => stepped(start, end, interval_days.get()),
        Pattern::MonthlyByPosition { position, weekday } => {
            monthly_by_position(start, end, position, weekday)
        }
        Pattern::MonthlyByDay { day_of_month } => monthly_by_day(start, end, day_of_month),
    };

    tracing::debug!(
        "Generated {} occurrences for {} rule ({} to {})",
        dates.len(),
        rule.kind(),
        start,
        end
    );

    dates
}

/// The first few occurrences of a rule, for showing while a form is edited
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Preview {
    pub summary: String,
    pub dates: Vec<NaiveDate>,
    /// Total occurrences in the window, including those not shown
    pub total: usize,
}

impl Preview {
    pub fn is_truncated(&self) -> bool {
        self.total > self.dates.len()
    }
}

/// Summarize a rule and list at most `limit` of its occurrences
pub fn preview(rule: &RecurrenceRule, limit: usize) -> Preview {
    let mut dates = generate(rule);
    let total = dates.len();
    dates.truncate(limit);

    Preview {
        summary: describe(rule),
        dates,
        total,
    }
}

/// `first`, then every `step` days while not past `end`
fn stepped(first: NaiveDate, end: NaiveDate, step: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = Some(first);

    while let Some(date) = current.filter(|d| *d <= end) {
        dates.push(date);
        current = date.checked_add_days(Days::new(u64::from(step)));
    }

    dates
}

fn weekly(start: NaiveDate, end: NaiveDate, weekday: Weekday) -> Vec<NaiveDate> {
    next_weekday_on_or_after(start, weekday)
        .map(|first| stepped(first, end, 7))
        .unwrap_or_default()
}

fn monthly_by_position(
    start: NaiveDate,
    end: NaiveDate,
    position: MonthPosition,
    weekday: Weekday,
) -> Vec<NaiveDate> {
    months_between(start, end)
        .filter_map(|(year, month)| match position {
            MonthPosition::Last => last_weekday_of_month(year, month, weekday),
            nth => nth_weekday_of_month(year, month, weekday, u32::from(nth.number())),
        })
        .filter(|d| (start..=end).contains(d))
        .collect()
}

fn monthly_by_day(
    start: NaiveDate,
    end: NaiveDate,
    day_of_month: DayOfMonth,
) -> Vec<NaiveDate> {
    months_between(start, end)
        .filter_map(|(year, month)| {
            let day = day_of_month.get().min(days_in_month(year, month));
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .filter(|d| (start..=end).contains(d))
        .collect()
}
