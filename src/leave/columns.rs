use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumString;
use utoipa::ToSchema;

use super::filter::DATE_FORMAT;
use crate::model::leave_record::{LeaveRecord, LeaveStatus};
use crate::model::leave_type::LeaveType;

/// One entry of a column's filter drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterOption {
    #[schema(example = "Annual Leave")]
    pub text: String,
    #[schema(example = "annual")]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Date,
    DateRange,
    #[serde(rename = "option")]
    Actions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub title: String,
    pub key: String,
    #[schema(nullable = true)]
    pub data_index: Option<String>,
    #[schema(nullable = true)]
    pub value_type: Option<ValueType>,
    pub sortable: bool,
    pub hide_in_search: bool,
    pub hide_in_table: bool,
    pub filters: Vec<FilterOption>,
    /// Criteria keys a range search on this column is split into.
    pub search_keys: Vec<String>,
}

impl ColumnSpec {
    fn new(title: &str, key: &str, data_index: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            key: key.to_string(),
            data_index: data_index.map(str::to_string),
            value_type: None,
            sortable: false,
            hide_in_search: false,
            hide_in_table: false,
            filters: Vec::new(),
            search_keys: Vec::new(),
        }
    }

    fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    fn hide_in_search(mut self) -> Self {
        self.hide_in_search = true;
        self
    }

    fn hide_in_table(mut self) -> Self {
        self.hide_in_table = true;
        self
    }

    fn filters(mut self, filters: Vec<FilterOption>) -> Self {
        self.filters = filters;
        self
    }
}

pub fn type_filter(leave_types: &[LeaveType]) -> Vec<FilterOption> {
    leave_types
        .iter()
        .map(|t| FilterOption {
            text: t.name.clone(),
            value: t.code.clone(),
        })
        .collect()
}

pub fn status_filter() -> Vec<FilterOption> {
    LeaveStatus::iter()
        .map(|s| FilterOption {
            text: s.to_string(),
            value: s.to_string(),
        })
        .collect()
}

/// Columns of the "My Leave Applications" table.
pub fn columns(leave_types: &[LeaveType]) -> Vec<ColumnSpec> {
    let mut date_range = ColumnSpec::new("Start Date to End Date", "dateRange", Some("fromDate"))
        .value_type(ValueType::DateRange)
        .hide_in_table();
    date_range.search_keys = vec!["startTime".to_string(), "endTime".to_string()];

    vec![
        ColumnSpec::new("Leave Type", "leaveType", Some("leaveType"))
            .hide_in_search()
            .filters(type_filter(leave_types)),
        ColumnSpec::new("Start Date", "fromDate", Some("fromDate"))
            .value_type(ValueType::Date)
            .sortable(),
        date_range,
        ColumnSpec::new("End Date", "toDate", Some("toDate"))
            .value_type(ValueType::Date)
            .sortable(),
        ColumnSpec::new("Total Days", "totalDays", Some("toDate")).hide_in_search(),
        ColumnSpec::new("Status", "status", Some("status"))
            .hide_in_search()
            .filters(status_filter()),
        ColumnSpec::new("Action", "_id", None).value_type(ValueType::Actions),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum SortField {
    #[strum(serialize = "fromDate")]
    FromDate,
    #[strum(serialize = "toDate")]
    ToDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
pub enum SortOrder {
    #[default]
    #[strum(serialize = "ascend", serialize = "asc")]
    Ascend,
    #[strum(serialize = "descend", serialize = "desc")]
    Descend,
}

/// Stable sort on one of the date columns.
pub fn sort_records(records: &mut [LeaveRecord], field: SortField, order: SortOrder) {
    let key = |r: &LeaveRecord| match field {
        SortField::FromDate => r.from_date,
        SortField::ToDate => r.to_date,
    };
    match order {
        SortOrder::Ascend => records.sort_by_key(key),
        SortOrder::Descend => records.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowAction {
    #[schema(example = "View")]
    pub label: String,
    #[schema(example = "/leaves/view/1")]
    pub href: String,
}

/// How the table renders one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowDisplay {
    #[schema(example = "Annual")]
    pub leave_type_label: String,
    #[schema(nullable = true)]
    pub leave_type_color: Option<String>,
    #[schema(example = "2026-01-05")]
    pub from_date: String,
    #[schema(example = "2026-01-09")]
    pub to_date: String,
    #[schema(example = "processing")]
    pub status_badge: String,
    pub actions: Vec<RowAction>,
}

impl RowDisplay {
    pub fn for_record(record: &LeaveRecord) -> Self {
        let mut actions = vec![RowAction {
            label: "View".to_string(),
            href: format!("/leaves/view/{}", record.id),
        }];
        if record.status.is_editable() {
            actions.push(RowAction {
                label: "Edit".to_string(),
                href: format!("/leaves/edit/{}", record.id),
            });
        }

        Self {
            leave_type_label: capitalize_first_letter(&record.leave_type.code),
            leave_type_color: record.leave_type.color.clone(),
            from_date: record.from_date.format(DATE_FORMAT).to_string(),
            to_date: record.to_date.format(DATE_FORMAT).to_string(),
            status_badge: record.status.badge().to_string(),
            actions,
        }
    }
}

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
