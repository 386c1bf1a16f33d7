use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use derive_more::Deref;

use crate::model::leave_record::LeaveRecord;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Keys the table widget sends for paging; never a constraint.
pub const PAGINATION_KEYS: [&str; 2] = ["pageSize", "current"];

/// Select value meaning "no constraint".
pub const MATCH_ALL: &str = "all";

/// Local date-time shapes the date pickers send. `%.f` also accepts no fraction.
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Active search inputs keyed by column field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Criteria(BTreeMap<String, String>);

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

#[cfg(test)]
impl Criteria {
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Keeps the records matching every criterion, in input order.
pub fn filter_records(criteria: &Criteria, records: &[LeaveRecord]) -> Vec<LeaveRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches(criteria, record))
        .cloned()
        .collect()
}

pub fn matches(criteria: &Criteria, record: &LeaveRecord) -> bool {
    criteria
        .iter()
        .all(|(key, value)| matches_criterion(key, value, record))
}

fn matches_criterion(key: &str, value: &str, record: &LeaveRecord) -> bool {
    if value.is_empty() || PAGINATION_KEYS.contains(&key) || value == MATCH_ALL {
        return true;
    }

    match key {
        "startTime" => parse_criterion_date(value).is_none_or(|from| record.from_date >= from),
        "endTime" => parse_criterion_date(value).is_none_or(|to| record.to_date <= to),
        _ => match field_value(key, record) {
            Some(field) => contains_ignore_case(&field, value),
            None => true,
        },
    }
}

/// Text of `record` the search box for `key` is matched against.
fn field_value(key: &str, record: &LeaveRecord) -> Option<String> {
    let value = match key {
        "id" | "_id" => record.id.to_string(),
        "leaveType" => record.leave_type.code.clone(),
        "status" => record.status.to_string(),
        "fromDate" => record.from_date.format(DATE_FORMAT).to_string(),
        "toDate" => record.to_date.format(DATE_FORMAT).to_string(),
        "user" => record.user.full_name(),
        "department" => record.department.as_ref()?.name.clone(),
        _ => return None,
    };

    (!value.is_empty()).then_some(value)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Accepts plain dates, RFC 3339 timestamps and the local date-time strings
/// the date pickers emit. Timestamps keep the calendar date of their own offset.
pub fn parse_criterion_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}

/// Column header selections. A record passes a column when its value starts
/// with any selected option; an empty selection passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    pub leave_type: Vec<String>,
    pub status: Vec<String>,
}

impl ColumnFilters {
    pub fn is_empty(&self) -> bool {
        self.leave_type.is_empty() && self.status.is_empty()
    }

    pub fn matches(&self, record: &LeaveRecord) -> bool {
        starts_with_any(&self.leave_type, &record.leave_type.code)
            && starts_with_any(&self.status, record.status.as_ref())
    }
}

fn starts_with_any(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| value.starts_with(s.as_str()))
}
