use chrono::{Datelike, NaiveDate, Weekday};

use crate::model::holiday::HolidayPeriod;

/// Returns true for Monday to Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the working days of a leave request.
///
/// Every weekday in `[start, end]` counts as one day. Afterwards each holiday
/// period that fully contains the request subtracts its own length
/// (`end_date - start_date`, in days). The subtraction ignores weekends and a
/// request that only partially overlaps a holiday is not adjusted, so the
/// result can drop to zero or below.
pub fn compute(start: NaiveDate, end: NaiveDate, holidays: &[HolidayPeriod]) -> i64 {
    let mut working_days = weekdays_between(start, end);

    for holiday in holidays.iter().filter(|h| h.contains(start, end)) {
        working_days -= holiday.span_days();
    }

    working_days
}

/// Weekdays in `[start, end]`, zero for a reversed range. Whole weeks count
/// five each; only the leftover days are inspected.
fn weekdays_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if start > end {
        return 0;
    }
    let days = (end - start).num_days() + 1;
    let remainder = start
        .iter_days()
        .take((days % 7) as usize)
        .filter(|day| is_working_day(*day))
        .count() as i64;
    days / 7 * 5 + remainder
}

/// Holiday calendar of one year, used to fill the "Total Days" column.
#[derive(Debug, Clone, Default)]
pub struct WorkingDaysCalculator {
    holidays: Vec<HolidayPeriod>,
}

impl WorkingDaysCalculator {
    pub fn new(holidays: Vec<HolidayPeriod>) -> Self {
        Self { holidays }
    }

    pub fn compute(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        compute(start, end, &self.holidays)
    }
}
