use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, MySqlPool};
use tracing::debug;

use super::LeaveHistorySource;
use crate::model::holiday::HolidayPeriod;
use crate::model::leave_record::{
    DepartmentRef, LeaveRecord, LeaveStatus, LeaveTypeTag, Requester,
};
use crate::model::leave_type::LeaveType;

#[derive(Clone)]
pub struct MySqlLeaveStore {
    pool: MySqlPool,
}

impl MySqlLeaveStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct LeaveHistoryRow {
    id: u64,
    leave_type_code: String,
    leave_type_color: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: Option<String>,
    first_name: String,
    last_name: String,
    department_name: Option<String>,
}

impl TryFrom<LeaveHistoryRow> for LeaveRecord {
    type Error = anyhow::Error;

    fn try_from(row: LeaveHistoryRow) -> Result<Self> {
        // rows inserted without an explicit status default to pending
        let status = match row.status.as_deref() {
            None | Some("") => LeaveStatus::Pending,
            Some(s) => LeaveStatus::from_str(s)
                .map_err(|_| anyhow!("leave request {} has unknown status {:?}", row.id, s))?,
        };

        Ok(LeaveRecord {
            id: row.id,
            leave_type: LeaveTypeTag {
                code: row.leave_type_code,
                color: row.leave_type_color,
            },
            from_date: row.start_date,
            to_date: row.end_date,
            status,
            user: Requester {
                first_name: row.first_name,
                last_name: row.last_name,
            },
            department: row.department_name.map(|name| DepartmentRef { name }),
        })
    }
}

#[async_trait]
impl LeaveHistorySource for MySqlLeaveStore {
    async fn leave_history(&self, employee_id: u64) -> Result<Vec<LeaveRecord>> {
        let rows = sqlx::query_as::<_, LeaveHistoryRow>(
            r#"
            SELECT
                lr.id,
                COALESCE(lt.code, CAST(lr.leave_type AS CHAR)) AS leave_type_code,
                lt.color AS leave_type_color,
                lr.start_date,
                lr.end_date,
                CAST(lr.status AS CHAR) AS status,
                e.first_name,
                e.last_name,
                d.name AS department_name
            FROM leave_requests lr
            JOIN employees e ON e.id = lr.employee_id
            LEFT JOIN leave_types lt ON lt.code = lr.leave_type
            LEFT JOIN departments d ON d.id = e.department_id
            WHERE lr.employee_id = ?
            ORDER BY lr.created_at ASC, lr.id ASC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to fetch leave history of employee {employee_id}"))?;

        debug!(employee_id, rows = rows.len(), "Leave history fetched");

        rows.into_iter().map(LeaveRecord::try_from).collect()
    }

    async fn leave_types(&self) -> Result<Vec<LeaveType>> {
        let types = sqlx::query_as::<_, LeaveType>(
            r#"
            SELECT code, name, color
            FROM leave_types
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch leave types")?;

        debug!(count = types.len(), "Leave types fetched");
        Ok(types)
    }

    async fn holidays_by_year(&self, year: i32) -> Result<Vec<HolidayPeriod>> {
        let holidays = sqlx::query_as::<_, HolidayPeriod>(
            r#"
            SELECT start_date, end_date, title
            FROM holidays
            WHERE YEAR(start_date) = ? OR YEAR(end_date) = ?
            ORDER BY start_date
            "#,
        )
        .bind(year)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to fetch holidays of {year}"))?;

        debug!(year, count = holidays.len(), "Holidays fetched");
        Ok(holidays)
    }
}
