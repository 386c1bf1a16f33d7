use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

use crate::auth::user::AuthUser;
use crate::config::Config;
use crate::leave::columns::{self, ColumnSpec, FilterOption};
use crate::leave::filter::parse_criterion_date;
use crate::leave::history::{HistoryQuery, LeaveHistory};
use crate::leave::working_days::WorkingDaysCalculator;
use crate::store::LeaveHistorySource;

/// Query parameters understood by the leave history endpoint. Any other
/// parameter is matched as a case-insensitive substring against the field of
/// the same name. The handler reads them as a raw map; this type only
/// documents them.
#[derive(IntoParams)]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
#[allow(dead_code)]
pub struct LeaveHistoryParams {
    #[param(example = "annual")]
    /// Leave type code contains
    pub leave_type: Option<String>,
    #[param(example = "Pending")]
    /// Status contains, `all` for any
    pub status: Option<String>,
    #[param(example = "2026-01-01")]
    /// Leave starts on or after
    pub start_time: Option<String>,
    #[param(example = "2026-12-31")]
    /// Leave ends on or before
    pub end_time: Option<String>,
    /// Requester "first last" name contains
    pub user: Option<String>,
    /// Requester department name contains
    pub department: Option<String>,
    #[param(example = 1)]
    /// Page number (start with 1)
    pub current: Option<usize>,
    #[param(example = 10)]
    /// Rows per page
    pub page_size: Option<usize>,
    #[param(example = "fromDate")]
    /// `fromDate` or `toDate`
    pub sort: Option<String>,
    #[param(example = "descend")]
    /// `ascend` or `descend`
    pub order: Option<String>,
    #[param(example = "annual,sick")]
    /// Comma separated leave type prefixes
    pub leave_type_filter: Option<String>,
    #[param(example = "Pending")]
    /// Comma separated status prefixes
    pub status_filter: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsResponse {
    pub columns: Vec<ColumnSpec>,
    pub type_filter: Vec<FilterOption>,
    pub status_filter: Vec<FilterOption>,
    /// Where the toolbar button leads
    #[schema(example = "/leaves/create")]
    pub create_link: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkingDaysQuery {
    #[schema(example = "2026-03-02")]
    pub start_date: String,
    #[schema(example = "2026-03-06")]
    pub end_date: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDaysResponse {
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-03-06", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 5)]
    pub working_days: i64,
}

/// Leave history page of the signed-in employee
#[utoipa::path(
    get,
    path = "/api/v1/leave/history",
    params(LeaveHistoryParams),
    responses(
        (status = 200, description = "Filtered leave history page", body = HistoryPage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_history(
    auth: AuthUser,
    source: web::Data<dyn LeaveHistorySource>,
    config: web::Data<Config>,
    query: web::Query<HashMap<String, String>>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;
    let year = Local::now().year();

    info!(
        user_id = auth.user_id,
        username = %auth.username,
        role = ?auth.role,
        employee_id,
        "Leave history requested"
    );

    let view = LeaveHistory::load(source.get_ref(), employee_id, year)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, year, "Failed to load leave history");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let query = HistoryQuery::from_params(query.into_inner(), config.page_size);
    let page = view.request(query).await;

    Ok(HttpResponse::Ok().json(page))
}

/// Column specification of the leave history table
#[utoipa::path(
    get,
    path = "/api/v1/leave/history/columns",
    responses(
        (status = 200, description = "Columns with filter options", body = ColumnsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn history_columns(
    _auth: AuthUser,
    source: web::Data<dyn LeaveHistorySource>,
) -> actix_web::Result<impl Responder> {
    let leave_types = source.leave_types().await.map_err(|e| {
        error!(error = %e, "Failed to fetch leave types");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(ColumnsResponse {
        columns: columns::columns(&leave_types),
        type_filter: columns::type_filter(&leave_types),
        status_filter: columns::status_filter(),
        create_link: "/leaves/create".to_string(),
    }))
}

/// Working days between two dates, using the holiday calendar of the start year
#[utoipa::path(
    get,
    path = "/api/v1/leave/working-days",
    params(WorkingDaysQuery),
    responses(
        (status = 200, description = "Working day count", body = WorkingDaysResponse),
        (status = 400, description = "Invalid dates", body = Object, example = json!({
            "message": "startDate and endDate must be YYYY-MM-DD dates"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn working_days(
    _auth: AuthUser,
    source: web::Data<dyn LeaveHistorySource>,
    query: web::Query<WorkingDaysQuery>,
) -> actix_web::Result<impl Responder> {
    let (Some(start_date), Some(end_date)) = (
        parse_criterion_date(&query.start_date),
        parse_criterion_date(&query.end_date),
    ) else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "startDate and endDate must be YYYY-MM-DD dates"
        })));
    };

    let year = start_date.year();
    let holidays = source.holidays_by_year(year).await.map_err(|e| {
        error!(error = %e, year, "Failed to fetch holidays");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let working_days = WorkingDaysCalculator::new(holidays).compute(start_date, end_date);

    Ok(HttpResponse::Ok().json(WorkingDaysResponse {
        start_date,
        end_date,
        working_days,
    }))
}
