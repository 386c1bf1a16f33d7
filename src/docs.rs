use crate::api::leave_history::{ColumnsResponse, WorkingDaysQuery, WorkingDaysResponse};
use crate::leave::columns::{ColumnSpec, FilterOption, RowAction, RowDisplay, ValueType};
use crate::leave::history::{HistoryPage, LeaveRow};
use crate::model::holiday::HolidayPeriod;
use crate::model::leave_record::{DepartmentRef, LeaveRecord, LeaveStatus, LeaveTypeTag, Requester};
use crate::model::leave_type::LeaveType;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave History API",
        version = "1.0.0",
        description = r#"
## My Leave Applications

Backs the employee self-service screen that lists the signed-in employee's
leave applications.

### 🔹 Key Features
- **Leave history**
  - Newest first, with search criteria, column filters, sorting and paging
- **Working days**
  - Weekdays of a leave request, adjusted by the holiday calendar
- **Table layout**
  - Column specification with leave type and status filter options

### 🔐 Security
Every endpoint requires a **JWT Bearer** access token. The employee is taken
from the token, never from a parameter.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_history::leave_history,
        crate::api::leave_history::history_columns,
        crate::api::leave_history::working_days,
    ),
    components(
        schemas(
            HistoryPage,
            LeaveRow,
            LeaveRecord,
            LeaveStatus,
            LeaveTypeTag,
            Requester,
            DepartmentRef,
            RowDisplay,
            RowAction,
            ColumnsResponse,
            ColumnSpec,
            FilterOption,
            ValueType,
            LeaveType,
            HolidayPeriod,
            WorkingDaysQuery,
            WorkingDaysResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave history APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_the_leave_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/leave/history"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/leave/working-days"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn history_query_parameters_are_camel_case() {
        let doc = ApiDoc::openapi();
        let history = doc.paths.paths.get("/api/v1/leave/history").expect("history path");
        let get = history
            .operations
            .get(&openapi::PathItemType::Get)
            .expect("GET operation");
        let names: Vec<&str> = get
            .parameters
            .iter()
            .flatten()
            .map(|p| p.name.as_str())
            .collect();

        for name in ["leaveType", "startTime", "pageSize", "leaveTypeFilter", "statusFilter"] {
            assert!(names.contains(&name), "missing {name} in {names:?}");
        }
    }
}
