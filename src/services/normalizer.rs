//! Sheet grid to typed records, one function per dataset.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::{ACTIVE_SHEET, INACTIVE_SHEET, LEAVE_SHEET, PERFORMANCE_SHEET};
use crate::error::LoadError;
use crate::models::*;
use crate::services::derived::{self, LeaveColumns};
use crate::types::{excel_serial_to_datetime, Cell, Table};

pub const DEFAULT_BUSINESS_UNIT: &str = "Unassigned";
pub const DEFAULT_REPORTING_TO: &str = "Direct to CEO";

pub type Normalized<T> = Result<(Vec<T>, SchemaReport), LoadError>;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d-%B-%Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Coerce a cell to a date. Anything that does not look like one is `None`.
pub fn coerce_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Number(n) => excel_serial_to_datetime(*n).map(|dt| dt.date()),
        Cell::Text(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .or_else(|| {
                    DATETIME_FORMATS
                        .iter()
                        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                        .map(|dt| dt.date())
                })
        }
        Cell::Empty | Cell::Bool(_) => None,
    }
}

fn check_schema(table: &Table, sheet: &str, specs: &[ColumnSpec]) -> Result<SchemaReport, LoadError> {
    let report = SchemaReport::check(&table.columns, specs);
    if let Some(spec) = report.first_missing_required(specs) {
        return Err(LoadError::MissingColumn {
            sheet: sheet.to_string(),
            column: spec.label.to_string(),
        });
    }
    if !report.missing.is_empty() {
        log::debug!("'{}' lacks optional columns {:?}", sheet, report.missing);
    }
    Ok(report)
}

/// Active staff, with `header_row` already resolved.
pub fn normalize_active(grid: &[Vec<Cell>], header_row: usize) -> Normalized<ActiveEmployee> {
    let table = Table::from_grid(grid, header_row);
    let schema = check_schema(&table, ACTIVE_SHEET, ACTIVE_COLUMNS)?;
    let records = table
        .iter_rows()
        .filter_map(|row| {
            let name = row.string(NAME)?;
            let employee_number = row.string(EMPLOYEE_NUMBER);
            // A repeated sub-header inside the data.
            if employee_number.as_deref() == Some(EMPLOYEE_NUMBER) {
                return None;
            }
            Some(ActiveEmployee {
                employee_number,
                name,
                designation: row.string(DESIGNATION),
                department: row.string(DEPARTMENT),
                business_unit: row
                    .string(BUSINESS_UNIT)
                    .unwrap_or_else(|| DEFAULT_BUSINESS_UNIT.to_string()),
                reporting_to: row
                    .string(REPORTING_TO)
                    .unwrap_or_else(|| DEFAULT_REPORTING_TO.to_string()),
                joining_date: coerce_date(row.get(JOINING_DATE)),
                employment_status: row.string(EMPLOYMENT_STATUS),
                cv_link: row.string(PROFILES),
            })
        })
        .collect();
    Ok((records, schema))
}

/// Inactive staff; header is the first row.
pub fn normalize_inactive(grid: &[Vec<Cell>]) -> Normalized<InactiveEmployee> {
    let table = Table::from_grid(grid, 0);
    let schema = check_schema(&table, INACTIVE_SHEET, INACTIVE_COLUMNS)?;
    let records = table
        .iter_rows()
        .filter_map(|row| {
            Some(InactiveEmployee {
                name: row.string(NAME)?,
                designation: row.string(DESIGNATION),
                exit_date: coerce_date(row.get(EXIT_DATE)),
                reason: row.string(REASON),
            })
        })
        .collect();
    Ok((records, schema))
}

/// Recruitment requests; funnel stage is only derived when the status column exists.
pub fn normalize_recruitment(grid: &[Vec<Cell>]) -> Normalized<RecruitmentRequest> {
    let table = Table::from_grid(grid, 0);
    let schema = SchemaReport::check(&table.columns, RECRUITMENT_COLUMNS);
    let has_status = table.has_column(STANDING);
    let records = table
        .iter_rows()
        .map(|row| {
            let raw_status = row.string(STANDING);
            let funnel_stage =
                has_status.then(|| derived::funnel_stage(raw_status.as_deref().unwrap_or_default()));
            RecruitmentRequest {
                business_unit: row.string(BU),
                position: row.string(POSITION),
                status: row.string(STATUS),
                raw_status,
                request_by: row.string(REQUEST_BY),
                funnel_stage,
            }
        })
        .collect();
    Ok((records, schema))
}

/// Performance evaluations; a sheet without the score column fails as a whole.
pub fn normalize_performance(grid: &[Vec<Cell>]) -> Normalized<PerformanceEvaluation> {
    let table = Table::from_grid(grid, 0);
    let schema = check_schema(&table, PERFORMANCE_SHEET, PERFORMANCE_COLUMNS)?;
    let records = table
        .iter_rows()
        .filter_map(|row| {
            let name = row.string(NAME)?;
            let score = row.get(SCORE).as_number();
            Some(PerformanceEvaluation {
                name,
                score,
                evaluated_by: row.string(EVALUATED_BY),
                category: derived::performance_category(score),
            })
        })
        .collect();
    Ok((records, schema))
}

/// Leave summary with its header at `header_row`. When no column is labelled
/// "Employee Name", the second column is taken as the identity column.
pub fn normalize_leave(grid: &[Vec<Cell>], header_row: usize) -> Normalized<LeaveSummary> {
    let mut table = Table::from_grid(grid, header_row);
    if !table.has_column(EMPLOYEE_NAME) {
        if table.columns.len() < 2 {
            return Err(LoadError::NoColumnAt {
                sheet: LEAVE_SHEET.to_string(),
                index: 1,
            });
        }
        log::debug!("'{}' has no '{}' column; using '{}'", LEAVE_SHEET, EMPLOYEE_NAME, table.columns[1]);
        table.rename_column(1, EMPLOYEE_NAME);
    }
    let groups = derived::leave_columns(&table.columns);
    let schema = leave_schema(&table, &groups);
    let records = table
        .iter_rows()
        .filter_map(|row| {
            let employee_name = row.string(EMPLOYEE_NAME)?;
            let value = |idx: Option<usize>| {
                idx.and_then(|i| table.columns.get(i))
                    .and_then(|c| row.get(c).as_number())
            };
            let leave_types = groups
                .iter()
                .map(|g| LeaveTypeEntry {
                    leave_type: g.leave_type.clone(),
                    entitled: value(g.entitled),
                    availed: value(g.availed),
                    balance: value(g.balance),
                    tracks_balance: g.balance.is_some(),
                })
                .collect();
            Some(LeaveSummary {
                employee_name,
                designation: row.string(DESIGNATION),
                leave_types,
                total_availed: derived::total_availed(&row),
            })
        })
        .collect();
    Ok((records, schema))
}

fn leave_schema(table: &Table, groups: &[LeaveColumns]) -> SchemaReport {
    let mut report = SchemaReport::check(&table.columns, LEAVE_COLUMNS);
    let claimed: Vec<usize> = groups
        .iter()
        .flat_map(|g| [g.entitled, g.availed, g.balance])
        .flatten()
        .collect();
    report.unmatched = table
        .columns
        .iter()
        .enumerate()
        .filter(|(i, c)| !claimed.contains(i) && !LEAVE_COLUMNS.iter().any(|s| s.label == c.as_str()))
        .map(|(_, c)| c.clone())
        .collect();
    report.incomplete_leave_types = groups
        .iter()
        .filter(|g| g.availed.is_none() || g.balance.is_none())
        .map(|g| g.leave_type.clone())
        .collect();
    report
}
