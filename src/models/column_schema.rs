use serde::Serialize;

/// Declared mapping of a semantic field to the source column label that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub label: &'static str,
    pub required: bool,
}

const fn col(field: &'static str, label: &'static str) -> ColumnSpec {
    ColumnSpec {
        field,
        label,
        required: false,
    }
}

const fn required(field: &'static str, label: &'static str) -> ColumnSpec {
    ColumnSpec {
        field,
        label,
        required: true,
    }
}

pub const EMPLOYEE_NUMBER: &str = "Employee Number";
pub const NAME: &str = "Name";
pub const DESIGNATION: &str = "Designation";
pub const DEPARTMENT: &str = "Department";
pub const BUSINESS_UNIT: &str = "Business Unit";
pub const REPORTING_TO: &str = "Reporting To";
pub const JOINING_DATE: &str = "Joining Date";
pub const EMPLOYMENT_STATUS: &str = "Employment Status";
pub const PROFILES: &str = "Profiles";
pub const EXIT_DATE: &str = "Exit Date";
pub const REASON: &str = "Reason";
pub const BU: &str = "BU";
pub const POSITION: &str = "Position";
pub const STATUS: &str = "Status";
pub const STANDING: &str = "Standing";
pub const REQUEST_BY: &str = "Request By";
pub const SCORE: &str = "Total Points (Out of 100)";
pub const EVALUATED_BY: &str = "Evaluated By";
pub const EMPLOYEE_NAME: &str = "Employee Name";

pub const ACTIVE_COLUMNS: &[ColumnSpec] = &[
    col("employee_number", EMPLOYEE_NUMBER),
    required("name", NAME),
    col("designation", DESIGNATION),
    col("department", DEPARTMENT),
    col("business_unit", BUSINESS_UNIT),
    col("reporting_to", REPORTING_TO),
    col("joining_date", JOINING_DATE),
    col("employment_status", EMPLOYMENT_STATUS),
    col("cv_link", PROFILES),
];

pub const INACTIVE_COLUMNS: &[ColumnSpec] = &[
    required("name", NAME),
    col("designation", DESIGNATION),
    col("exit_date", EXIT_DATE),
    col("reason", REASON),
];

pub const RECRUITMENT_COLUMNS: &[ColumnSpec] = &[
    col("business_unit", BU),
    col("position", POSITION),
    col("status", STATUS),
    col("raw_status", STANDING),
    col("request_by", REQUEST_BY),
];

pub const PERFORMANCE_COLUMNS: &[ColumnSpec] = &[
    required("name", NAME),
    required("score", SCORE),
    col("evaluated_by", EVALUATED_BY),
];

/// Fixed leave columns; leave-type columns are matched by suffix and reported separately.
pub const LEAVE_COLUMNS: &[ColumnSpec] = &[
    required("employee_name", EMPLOYEE_NAME),
    col("designation", DESIGNATION),
];

/// Result of checking a sheet's columns against its declared schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    /// Declared labels absent from the sheet.
    pub missing: Vec<String>,
    /// Sheet columns no declared field (or leave-type convention) claims.
    pub unmatched: Vec<String>,
    /// Leave types lacking an availed or balance column.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incomplete_leave_types: Vec<String>,
}

impl SchemaReport {
    pub fn check(columns: &[String], specs: &[ColumnSpec]) -> Self {
        let missing = specs
            .iter()
            .filter(|s| !columns.iter().any(|c| c == s.label))
            .map(|s| s.label.to_string())
            .collect();
        let unmatched = columns
            .iter()
            .filter(|c| !specs.iter().any(|s| s.label == c.as_str()))
            .cloned()
            .collect();
        SchemaReport {
            missing,
            unmatched,
            incomplete_leave_types: Vec::new(),
        }
    }

    /// First required column that is absent.
    pub fn first_missing_required<'a>(&self, specs: &'a [ColumnSpec]) -> Option<&'a ColumnSpec> {
        specs
            .iter()
            .find(|s| s.required && self.missing.iter().any(|m| m == s.label))
    }
}
