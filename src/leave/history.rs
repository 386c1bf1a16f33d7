use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::columns::{self, FilterOption, RowDisplay, SortField, SortOrder, sort_records};
use super::filter::{ColumnFilters, Criteria, filter_records};
use super::working_days::WorkingDaysCalculator;
use crate::model::holiday::HolidayPeriod;
use crate::model::leave_record::LeaveRecord;
use crate::model::leave_type::LeaveType;
use crate::store::LeaveHistorySource;

pub const MAX_PAGE_SIZE: usize = 100;

/// A records page request as the table widget sends it.
///
/// Everything that is not a paging, sorting or column filter parameter ends
/// up in `criteria`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub criteria: Criteria,
    pub column_filters: ColumnFilters,
    pub sort: Option<(SortField, SortOrder)>,
    pub current: usize,
    pub page_size: usize,
}

impl HistoryQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: Criteria::new(),
            column_filters: ColumnFilters::default(),
            sort: None,
            current: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Splits raw query parameters. Unparsable paging or sorting values fall
    /// back to their defaults.
    pub fn from_params(params: HashMap<String, String>, default_page_size: usize) -> Self {
        let mut query = Self::new(default_page_size);
        let mut criteria: Criteria = params.into_iter().collect();

        if let Some(current) = criteria.remove("current").and_then(|v| v.parse::<usize>().ok()) {
            query.current = current.max(1);
        }
        if let Some(size) = criteria.remove("pageSize").and_then(|v| v.parse::<usize>().ok()) {
            query.page_size = size.clamp(1, MAX_PAGE_SIZE);
        }

        let order = criteria
            .remove("order")
            .and_then(|v| SortOrder::from_str(&v).ok())
            .unwrap_or_default();
        query.sort = criteria
            .remove("sort")
            .and_then(|v| SortField::from_str(&v).ok())
            .map(|field| (field, order));

        query.column_filters = ColumnFilters {
            leave_type: split_list(criteria.remove("leaveTypeFilter")),
            status: split_list(criteria.remove("statusFilter")),
        };
        query.criteria = criteria;
        query
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// A record together with its computed and rendered columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRow {
    #[serde(flatten)]
    pub record: LeaveRecord,
    #[schema(example = 5)]
    pub total_days: i64,
    pub display: RowDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub data: Vec<LeaveRow>,
    pub success: bool,
    /// Matching records before paging.
    #[schema(example = 1)]
    pub total: usize,
    #[schema(example = 1)]
    pub current: usize,
    #[schema(example = 10)]
    pub page_size: usize,
    /// True when the employee has no leave applications at all.
    pub empty: bool,
    /// Current leave type options for the column filter.
    pub type_filter: Vec<FilterOption>,
}

/// Everything the leave history screen shows for one employee.
pub struct LeaveHistory {
    employee_id: u64,
    records: Vec<LeaveRecord>,
    leave_types: Vec<LeaveType>,
    calculator: WorkingDaysCalculator,
}

impl LeaveHistory {
    /// `history` comes oldest first; the screen lists the newest first.
    pub fn new(
        employee_id: u64,
        mut history: Vec<LeaveRecord>,
        leave_types: Vec<LeaveType>,
        holidays: Vec<HolidayPeriod>,
    ) -> Self {
        history.reverse();
        Self {
            employee_id,
            records: history,
            leave_types,
            calculator: WorkingDaysCalculator::new(holidays),
        }
    }

    /// Runs the three reads concurrently and builds the view once all resolve.
    pub async fn load(
        source: &dyn LeaveHistorySource,
        employee_id: u64,
        year: i32,
    ) -> Result<Self> {
        let (history, leave_types, holidays) = futures::try_join!(
            source.leave_history(employee_id),
            source.leave_types(),
            source.holidays_by_year(year),
        )?;

        info!(
            employee_id,
            year,
            records = history.len(),
            holidays = holidays.len(),
            "Leave history loaded"
        );

        Ok(Self::new(employee_id, history, leave_types, holidays))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Options of the leave type column filter.
    pub fn type_filter(&self) -> Vec<FilterOption> {
        columns::type_filter(&self.leave_types)
    }

    pub fn working_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        self.calculator.compute(start, end)
    }

    pub fn row(&self, record: &LeaveRecord) -> LeaveRow {
        LeaveRow {
            total_days: self.working_days(record.from_date, record.to_date),
            display: RowDisplay::for_record(record),
            record: record.clone(),
        }
    }

    /// Filters, sorts and pages the records.
    pub fn query(&self, query: &HistoryQuery) -> HistoryPage {
        let mut matching = filter_records(&query.criteria, &self.records);
        if !query.column_filters.is_empty() {
            matching.retain(|r| query.column_filters.matches(r));
        }
        if let Some((field, order)) = query.sort {
            sort_records(&mut matching, field, order);
        }

        let total = matching.len();
        let data: Vec<LeaveRow> = matching
            .iter()
            .skip(query.current.saturating_sub(1).saturating_mul(query.page_size))
            .take(query.page_size)
            .map(|r| self.row(r))
            .collect();

        debug!(
            employee_id = self.employee_id,
            total,
            returned = data.len(),
            current = query.current,
            "Leave history page built"
        );

        HistoryPage {
            data,
            success: true,
            total,
            current: query.current,
            page_size: query.page_size,
            empty: self.is_empty(),
            type_filter: self.type_filter(),
        }
    }

    /// Data-source entry point for the table widget.
    pub async fn request(&self, query: HistoryQuery) -> HistoryPage {
        self.query(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_record::LeaveStatus;
    use crate::test_support::{StaticSource, date, leave_type, record};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn history() -> LeaveHistory {
        // oldest first, as the store returns them
        let records = vec![
            record(1, "annual", (2024, 3, 4), (2024, 3, 8), LeaveStatus::Approved),
            record(2, "annual", (2024, 3, 9), (2024, 3, 9), LeaveStatus::Rejected),
            record(3, "sick", (2024, 4, 1), (2024, 4, 3), LeaveStatus::Pending),
        ];
        LeaveHistory::new(
            42,
            records,
            vec![
                leave_type("annual", "Annual Leave", "green"),
                leave_type("sick", "Sick Leave", "red"),
            ],
            vec![HolidayPeriod::new(date(2024, 4, 1), date(2024, 4, 5))],
        )
    }

    fn ids(page: &HistoryPage) -> Vec<u64> {
        page.data.iter().map(|row| row.record.id).collect()
    }

    #[test]
    fn records_are_listed_newest_first() {
        let page = history().query(&HistoryQuery::new(10));
        assert_eq!(ids(&page), vec![3, 2, 1]);
    }

    #[test]
    fn rows_carry_working_days() {
        let view = history();
        let page = view.query(&HistoryQuery::new(10));

        let days: Vec<i64> = page.data.iter().map(|row| row.total_days).collect();
        // sick leave Apr 1-3 sits inside the Apr 1-5 holiday: 3 - 4
        assert_eq!(days, vec![-1, 0, 5]);
        assert_eq!(page.total, 3);
        assert!(page.success);
        assert!(!page.empty);
    }

    #[test]
    fn pages_offer_the_loaded_leave_types() {
        let page = history().query(&HistoryQuery::new(10));
        let values: Vec<&str> = page.type_filter.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["annual", "sick"]);
    }

    #[test]
    fn params_are_split_into_controls_and_criteria() {
        let query = HistoryQuery::from_params(
            params(&[
                ("current", "2"),
                ("pageSize", "1"),
                ("sort", "toDate"),
                ("order", "descend"),
                ("statusFilter", "Pending, Approved"),
                ("leaveType", "ann"),
            ]),
            10,
        );

        assert_eq!(query.current, 2);
        assert_eq!(query.page_size, 1);
        assert_eq!(query.sort, Some((SortField::ToDate, SortOrder::Descend)));
        assert_eq!(query.column_filters.status, vec!["Pending", "Approved"]);
        assert!(query.column_filters.leave_type.is_empty());
        assert_eq!(query.criteria, Criteria::new().with("leaveType", "ann"));
    }

    #[test]
    fn bad_paging_values_fall_back() {
        let query = HistoryQuery::from_params(
            params(&[("current", "0"), ("pageSize", "5000"), ("sort", "status")]),
            10,
        );
        assert_eq!(query.current, 1);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);
        assert_eq!(query.sort, None);

        let query = HistoryQuery::from_params(params(&[("current", "two")]), 10);
        assert_eq!(query.current, 1);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn pages_are_sliced_after_filtering() {
        let view = history();
        let mut query = HistoryQuery::new(1);
        query.criteria = Criteria::new().with("leaveType", "annual");

        let first = view.query(&query);
        assert_eq!(ids(&first), vec![2]);
        assert_eq!(first.total, 2);

        query.current = 2;
        assert_eq!(ids(&view.query(&query)), vec![1]);

        query.current = 3;
        let past_end = view.query(&query);
        assert!(past_end.data.is_empty());
        assert_eq!(past_end.total, 2);
    }

    #[test]
    fn column_filters_and_sorting_apply() {
        let view = history();
        let query = HistoryQuery::from_params(
            params(&[
                ("leaveTypeFilter", "annual"),
                ("sort", "fromDate"),
                ("order", "ascend"),
            ]),
            10,
        );
        assert_eq!(ids(&view.query(&query)), vec![1, 2]);
    }

    #[test]
    fn empty_history_is_flagged() {
        let view = LeaveHistory::new(1, Vec::new(), Vec::new(), Vec::new());
        let page = view.query(&HistoryQuery::new(10));
        assert!(view.is_empty());
        assert!(page.empty);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn row_serializes_flat() {
        let view = history();
        let row = view.row(&record(1, "annual", (2024, 3, 4), (2024, 3, 8), LeaveStatus::Approved));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["fromDate"], "2024-03-04");
        assert_eq!(json["totalDays"], 5);
        assert_eq!(json["display"]["leaveTypeLabel"], "Annual");
    }

    #[actix_web::test]
    async fn request_wraps_the_pure_query() {
        let view = history();
        let query = HistoryQuery::from_params(params(&[("status", "all")]), 10);
        let page = view.request(query.clone()).await;
        assert_eq!(page, view.query(&query));
        assert_eq!(ids(&page), vec![3, 2, 1]);
    }

    #[actix_web::test]
    async fn load_reads_all_three_collections() {
        let mut source = StaticSource {
            leave_types: vec![leave_type("annual", "Annual Leave", "green")],
            holidays: vec![
                HolidayPeriod::new(date(2024, 3, 4), date(2024, 3, 8)),
                HolidayPeriod::new(date(2023, 3, 4), date(2023, 3, 8)),
            ],
            ..Default::default()
        };
        source.history.insert(
            7,
            vec![
                record(1, "annual", (2024, 3, 4), (2024, 3, 8), LeaveStatus::Approved),
                record(2, "annual", (2024, 5, 6), (2024, 5, 6), LeaveStatus::Pending),
            ],
        );

        let view = LeaveHistory::load(&source, 7, 2024).await.unwrap();

        assert_eq!(ids(&view.query(&HistoryQuery::new(10))), vec![2, 1]);
        assert_eq!(view.type_filter().len(), 1);
        // only the 2024 holiday applies: 5 - 4
        assert_eq!(view.working_days(date(2024, 3, 4), date(2024, 3, 8)), 1);
        assert_eq!(StaticSource::reads(&source.history_reads), 1);
    }

    #[actix_web::test]
    async fn load_fails_when_a_read_fails() {
        let source = StaticSource {
            fail_history: true,
            ..Default::default()
        };
        assert!(LeaveHistory::load(&source, 7, 2024).await.is_err());
    }
}
