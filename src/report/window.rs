use chrono::{Datelike, Duration, NaiveDate};

use crate::consts::{COMPARISON_SHIFT_DAYS, DATE_FORMAT};

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

/// Monday of the ISO week containing `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday();
    date - Duration::days(weekday as i64)
}

impl DateRange {
    pub(crate) fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Monday through Sunday of the week before the one containing `today`
    pub(crate) fn last_week(today: NaiveDate) -> Self {
        let start = week_start(today) - Duration::days(7);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub(crate) fn shifted_back(self, days: i64) -> Self {
        Self {
            start: self.start - Duration::days(days),
            end: self.end - Duration::days(days),
        }
    }

    /// The equal-length period this range is compared against
    pub(crate) fn comparison(self) -> Self {
        self.shifted_back(COMPARISON_SHIFT_DAYS)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
