use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Organisation-wide non-working stretch, e.g. a multi-day public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HolidayPeriod {
    #[schema(example = "2026-12-24", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-12-26", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Christmas", nullable = true)]
    pub title: Option<String>,
}

impl HolidayPeriod {
    #[cfg(test)]
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            title: None,
        }
    }

    /// True when `[start, end]` lies entirely inside this period.
    pub fn contains(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start >= self.start_date && end <= self.end_date
    }

    /// Day difference between the period bounds, end exclusive.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
