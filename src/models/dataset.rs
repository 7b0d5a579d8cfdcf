use serde::Serialize;

use super::{
    ActiveEmployee, InactiveEmployee, LeaveSummary, PerformanceEvaluation, RecruitmentRequest,
    SchemaReport,
};
use crate::error::LoadError;

/// How a dataset came to be what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DatasetStatus {
    /// Read successfully; may still hold zero records.
    Loaded,
    /// Source file not present.
    Absent,
    /// Source file present but unreadable or malformed.
    Failed { reason: String },
}

/// Records of one category plus the outcome of loading them. Always exists, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset<T> {
    pub records: Vec<T>,
    pub status: DatasetStatus,
    pub schema: SchemaReport,
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Dataset::absent()
    }
}

impl<T> Dataset<T> {
    pub fn loaded(records: Vec<T>, schema: SchemaReport) -> Self {
        Dataset {
            records,
            status: DatasetStatus::Loaded,
            schema,
        }
    }

    pub fn absent() -> Self {
        Dataset {
            records: Vec::new(),
            status: DatasetStatus::Absent,
            schema: SchemaReport::default(),
        }
    }

    pub fn failed(err: &LoadError) -> Self {
        Dataset {
            records: Vec::new(),
            status: DatasetStatus::Failed {
                reason: err.to_string(),
            },
            schema: SchemaReport::default(),
        }
    }

    pub fn from_result(result: Result<(Vec<T>, SchemaReport), LoadError>) -> Self {
        match result {
            Ok((records, schema)) => Dataset::loaded(records, schema),
            Err(e) => Dataset::failed(&e),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_absent(&self) -> bool {
        self.status == DatasetStatus::Absent
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, DatasetStatus::Failed { .. })
    }
}

/// The five named datasets consumed by the views.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasets {
    pub active: Dataset<ActiveEmployee>,
    pub inactive: Dataset<InactiveEmployee>,
    pub recruitment: Dataset<RecruitmentRequest>,
    pub performance: Dataset<PerformanceEvaluation>,
    pub leave: Dataset<LeaveSummary>,
    /// Operator-visible load problems.
    pub warnings: Vec<String>,
}
