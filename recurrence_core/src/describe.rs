//! Human-readable rule summaries.

use crate::{weekday_index, MonthPosition, Pattern, RecurrenceRule};
use chrono::Weekday;

/// Weekday names indexed Sunday-first (0 = Sunday)
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Ordinal names indexed by position number minus one (5 = "last")
pub const POSITION_LABELS: [&str; 5] = ["1st", "2nd", "3rd", "4th", "last"];

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday_index(weekday) as usize]
}

pub fn position_label(position: MonthPosition) -> &'static str {
    POSITION_LABELS[usize::from(position.number()) - 1]
}

/// One sentence describing how a rule repeats
pub fn describe(rule: &RecurrenceRule) -> String {
    match rule.pattern {
        Pattern::Weekly { weekday } => format!("Every {}", weekday_label(weekday)),
        Pattern::DayInterval { interval_days } if interval_days.get() == 1 => {
            "Every day".to_string()
        }
        Pattern::DayInterval { interval_days } => format!("Every {} days", interval_days),
        Pattern::MonthlyByPosition { position, weekday } => format!(
            "Every {} {} of the month",
            position_label(position),
            weekday_label(weekday)
        ),
        Pattern::MonthlyByDay { day_of_month } => {
            format!("Every day {} of the month", day_of_month)
        }
    }
}

/// The window a rule covers, e.g. "from 2024-01-01 until 2024-12-31"
pub fn describe_window(rule: &RecurrenceRule) -> String {
    let window = format!("from {} until {}", rule.start_date, rule.effective_end());
    if rule.end_date.is_none() {
        format!("{} (end of year)", window)
    } else {
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DayOfMonth;
    use chrono::NaiveDate;
    use std::num::NonZeroU32;

    fn rule(pattern: Pattern) -> RecurrenceRule {
        RecurrenceRule::new(
            pattern,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31),
        )
    }

    #[test]
    fn test_describe_weekly() {
        assert_eq!(
            describe(&rule(Pattern::Weekly {
                weekday: Weekday::Fri
            })),
            "Every Friday"
        );
    }

    #[test]
    fn test_describe_day_interval() {
        assert_eq!(
            describe(&rule(Pattern::DayInterval {
                interval_days: NonZeroU32::new(10).unwrap()
            })),
            "Every 10 days"
        );
        assert_eq!(
            describe(&rule(Pattern::DayInterval {
                interval_days: NonZeroU32::new(1).unwrap()
            })),
            "Every day"
        );
    }

    #[test]
    fn test_describe_monthly_by_position() {
        assert_eq!(
            describe(&rule(Pattern::MonthlyByPosition {
                position: MonthPosition::First,
                weekday: Weekday::Fri
            })),
            "Every 1st Friday of the month"
        );
        assert_eq!(
            describe(&rule(Pattern::MonthlyByPosition {
                position: MonthPosition::Last,
                weekday: Weekday::Sun
            })),
            "Every last Sunday of the month"
        );
    }

    #[test]
    fn test_describe_monthly_by_day() {
        assert_eq!(
            describe(&rule(Pattern::MonthlyByDay {
                day_of_month: DayOfMonth::new(31).unwrap()
            })),
            "Every day 31 of the month"
        );
    }

    #[test]
    fn test_label_tables_cover_every_value() {
        assert_eq!(weekday_label(Weekday::Sun), "Sunday");
        assert_eq!(weekday_label(Weekday::Sat), "Saturday");
        assert_eq!(position_label(MonthPosition::Third), "3rd");
        assert_eq!(position_label(MonthPosition::Last), "last");
    }

    #[test]
    fn test_describe_window() {
        let bounded = rule(Pattern::MonthlyByDay {
            day_of_month: DayOfMonth::new(1).unwrap(),
        });
        assert_eq!(describe_window(&bounded), "from 2024-01-01 until 2024-03-31");

        let open = RecurrenceRule {
            end_date: None,
            ..bounded
        };
        assert_eq!(
            describe_window(&open),
            "from 2024-01-01 until 2024-12-31 (end of year)"
        );
    }
}
