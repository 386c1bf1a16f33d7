use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::model::holiday::HolidayPeriod;
use crate::model::leave_record::{LeaveRecord, LeaveStatus, LeaveTypeTag, Requester};
use crate::model::leave_type::LeaveType;
use crate::store::LeaveHistorySource;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn record(
    id: u64,
    code: &str,
    from: (i32, u32, u32),
    to: (i32, u32, u32),
    status: LeaveStatus,
) -> LeaveRecord {
    LeaveRecord {
        id,
        leave_type: LeaveTypeTag {
            code: code.to_string(),
            color: Some("blue".to_string()),
        },
        from_date: date(from.0, from.1, from.2),
        to_date: date(to.0, to.1, to.2),
        status,
        user: Requester {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        },
        department: None,
    }
}

pub fn leave_type(code: &str, name: &str, color: &str) -> LeaveType {
    LeaveType {
        code: code.to_string(),
        name: name.to_string(),
        color: Some(color.to_string()),
    }
}

/// In-memory source that counts how often each collection is read.
#[derive(Default)]
pub struct StaticSource {
    pub history: HashMap<u64, Vec<LeaveRecord>>,
    pub leave_types: Vec<LeaveType>,
    pub holidays: Vec<HolidayPeriod>,
    pub fail_history: bool,
    pub history_reads: AtomicUsize,
    pub leave_type_reads: AtomicUsize,
    pub holiday_reads: AtomicUsize,
}

impl StaticSource {
    pub fn reads(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeaveHistorySource for StaticSource {
    async fn leave_history(&self, employee_id: u64) -> Result<Vec<LeaveRecord>> {
        self.history_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_history {
            return Err(anyhow!("leave store unavailable"));
        }
        Ok(self.history.get(&employee_id).cloned().unwrap_or_default())
    }

    async fn leave_types(&self) -> Result<Vec<LeaveType>> {
        self.leave_type_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.leave_types.clone())
    }

    async fn holidays_by_year(&self, year: i32) -> Result<Vec<HolidayPeriod>> {
        self.holiday_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .holidays
            .iter()
            .filter(|h| h.start_date.year() == year || h.end_date.year() == year)
            .cloned()
            .collect())
    }
}
