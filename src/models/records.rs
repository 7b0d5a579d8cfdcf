use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEmployee {
    pub employee_number: Option<String>,
    pub name: String,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub business_unit: String,
    pub reporting_to: String,
    pub joining_date: Option<NaiveDate>,
    pub employment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_link: Option<String>,
}

impl ActiveEmployee {
    pub fn is_on_probation(&self) -> bool {
        self.employment_status
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains("probation"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InactiveEmployee {
    pub name: String,
    pub designation: Option<String>,
    pub exit_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

/// Recruitment pipeline position, in funnel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FunnelStage {
    Applied,
    Shortlisted,
    Interview,
    #[serde(rename = "Offer Extended")]
    OfferExtended,
    Hired,
}

impl FunnelStage {
    pub const ALL: [FunnelStage; 5] = [
        FunnelStage::Applied,
        FunnelStage::Shortlisted,
        FunnelStage::Interview,
        FunnelStage::OfferExtended,
        FunnelStage::Hired,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FunnelStage::Applied => "Applied",
            FunnelStage::Shortlisted => "Shortlisted",
            FunnelStage::Interview => "Interview",
            FunnelStage::OfferExtended => "Offer Extended",
            FunnelStage::Hired => "Hired",
        }
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentRequest {
    pub business_unit: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub raw_status: Option<String>,
    pub request_by: Option<String>,
    /// Unset when the sheet has no status column.
    pub funnel_stage: Option<FunnelStage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PerformanceCategory {
    #[serde(rename = "High Performer")]
    HighPerformer,
    Average,
    #[serde(rename = "Low Performer")]
    LowPerformer,
    Pending,
}

impl PerformanceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceCategory::HighPerformer => "High Performer",
            PerformanceCategory::Average => "Average",
            PerformanceCategory::LowPerformer => "Low Performer",
            PerformanceCategory::Pending => "Pending",
        }
    }
}

impl fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEvaluation {
    pub name: String,
    pub score: Option<f64>,
    pub evaluated_by: Option<String>,
    pub category: PerformanceCategory,
}

/// One leave type's three columns: `L` (entitled), `L.1` (availed), `L.2` (balance).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTypeEntry {
    pub leave_type: String,
    pub entitled: Option<f64>,
    pub availed: Option<f64>,
    pub balance: Option<f64>,
    /// Whether the sheet has an `L.2` column at all.
    pub tracks_balance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSummary {
    pub employee_name: String,
    pub designation: Option<String>,
    pub leave_types: Vec<LeaveTypeEntry>,
    pub total_availed: f64,
}
