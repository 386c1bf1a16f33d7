use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Approval state of a leave application.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Badge state the table shows next to the status label.
    pub fn badge(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "processing",
            LeaveStatus::Approved => "success",
            LeaveStatus::Rejected => "error",
        }
    }

    /// Only applications still waiting for a decision can be edited.
    pub fn is_editable(&self) -> bool {
        *self == LeaveStatus::Pending
    }
}

/// Leave type as embedded in a leave record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaveTypeTag {
    #[schema(example = "annual")]
    pub code: String,
    #[schema(example = "green", nullable = true)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Requester {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
}

impl Requester {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentRef {
    #[schema(example = "Engineering")]
    pub name: String,
}

/// One leave application of the signed-in employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    #[schema(example = 1)]
    pub id: u64,
    pub leave_type: LeaveTypeTag,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub from_date: NaiveDate,
    #[schema(example = "2026-01-09", format = "date", value_type = String)]
    pub to_date: NaiveDate,
    pub status: LeaveStatus,
    pub user: Requester,
    #[schema(nullable = true)]
    pub department: Option<DepartmentRef>,
}
