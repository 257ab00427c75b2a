//! Calendar arithmetic on local dates.
//!
//! All helpers use checked chrono arithmetic and return `None` rather than
//! panicking at the edges of the representable range.

use crate::types::weekday_index;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Number of days in the given month (28..=31)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// December 31st of `year`
pub fn last_day_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// First date on or after `date` that falls on `weekday`
pub fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let offset = (weekday_index(weekday) + 7 - weekday_index(date.weekday())) % 7;
    date.checked_add_days(Days::new(u64::from(offset)))
}

/// The `n`th (1-based) `weekday` of a month, if the month has that many
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (weekday_index(weekday) + 7 - weekday_index(first.weekday())) % 7;
    NaiveDate::from_ymd_opt(year, month, 1 + offset + (n - 1) * 7)
}

/// The final `weekday` of a month
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    let back = (weekday_index(last.weekday()) + 7 - weekday_index(weekday)) % 7;
    last.checked_sub_days(Days::new(u64::from(back)))
}

/// Iterator over the (year, month) pairs overlapping `[start, end]`
#[derive(Clone, Debug)]
pub struct Months {
    next: Option<(i32, u32)>,
    last: (i32, u32),
}

impl Iterator for Months {
    type Item = (i32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current >= self.last {
            None
        } else if current.1 == 12 {
            Some((current.0 + 1, 1))
        } else {
            Some((current.0, current.1 + 1))
        };
        Some(current)
    }
}

/// Months overlapping the inclusive window; empty when `start > end`
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Months {
    Months {
        next: (start <= end).then(|| (start.year(), start.month())),
        last: (end.year(), end.month()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_next_weekday_on_or_after() {
        // 2024-01-01 is a Monday
        assert_eq!(
            next_weekday_on_or_after(date(2024, 1, 1), Weekday::Fri),
            Some(date(2024, 1, 5))
        );
        assert_eq!(
            next_weekday_on_or_after(date(2024, 1, 1), Weekday::Mon),
            Some(date(2024, 1, 1))
        );
        assert_eq!(
            next_weekday_on_or_after(date(2024, 1, 1), Weekday::Sun),
            Some(date(2024, 1, 7))
        );
    }

    #[test]
    fn test_nth_weekday_of_month() {
        assert_eq!(
            nth_weekday_of_month(2024, 3, Weekday::Fri, 1),
            Some(date(2024, 3, 1))
        );
        assert_eq!(
            nth_weekday_of_month(2024, 1, Weekday::Fri, 4),
            Some(date(2024, 1, 26))
        );
        // February 2024 has only four Sundays
        assert_eq!(nth_weekday_of_month(2024, 2, Weekday::Sun, 5), None);
        assert_eq!(nth_weekday_of_month(2024, 2, Weekday::Sun, 0), None);
    }

    #[test]
    fn test_last_weekday_of_month() {
        assert_eq!(
            last_weekday_of_month(2024, 2, Weekday::Sun),
            Some(date(2024, 2, 25))
        );
        // March 2024 has five Fridays
        assert_eq!(
            last_weekday_of_month(2024, 3, Weekday::Fri),
            Some(date(2024, 3, 29))
        );
        assert_eq!(
            last_weekday_of_month(2024, 3, Weekday::Sun),
            Some(date(2024, 3, 31))
        );
    }

    #[test]
    fn test_months_between_crosses_year() {
        let months: Vec<_> = months_between(date(2023, 11, 20), date(2024, 2, 3)).collect();
        assert_eq!(months, vec![(2023, 11), (2023, 12), (2024, 1), (2024, 2)]);
    }

    #[test]
    fn test_months_between_single_and_empty() {
        let single: Vec<_> = months_between(date(2024, 2, 1), date(2024, 2, 29)).collect();
        assert_eq!(single, vec![(2024, 2)]);

        assert_eq!(months_between(date(2024, 5, 1), date(2024, 4, 1)).count(), 0);
    }
}
