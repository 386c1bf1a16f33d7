pub mod cache;
pub mod mysql;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::holiday::HolidayPeriod;
use crate::model::leave_record::LeaveRecord;
use crate::model::leave_type::LeaveType;

/// The three reads the leave history screen is built from.
#[async_trait]
pub trait LeaveHistorySource: Send + Sync {
    /// Leave applications of one employee, oldest first.
    async fn leave_history(&self, employee_id: u64) -> Result<Vec<LeaveRecord>>;

    async fn leave_types(&self) -> Result<Vec<LeaveType>>;

    /// Holiday periods starting or ending in `year`.
    async fn holidays_by_year(&self, year: i32) -> Result<Vec<HolidayPeriod>>;
}
