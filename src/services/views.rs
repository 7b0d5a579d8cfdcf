//! Section view models built from loaded datasets. Everything here is read-only over `Datasets`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::*;
use crate::types::format_number;

const NOT_LOADED: &str = "Data not loaded. Please ensure Excel files are in the folder.";
const TOP_LEAVE_USERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Overview,
    Leave,
    OrgStructure,
    Movement,
    Recruitment,
    Performance,
    MasterFile,
    Policies,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Overview,
        Section::Leave,
        Section::OrgStructure,
        Section::Movement,
        Section::Recruitment,
        Section::Performance,
        Section::MasterFile,
        Section::Policies,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Dashboard Overview",
            Section::Leave => "Leave Management",
            Section::OrgStructure => "Organization Structure",
            Section::Movement => "Employee Movement",
            Section::Recruitment => "Recruitment Tracking",
            Section::Performance => "Performance Management",
            Section::MasterFile => "Employee Master File",
            Section::Policies => "Policies & Documentation",
        }
    }
}

/// User-supplied narrowing for table views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFilters {
    pub search: Option<String>,
    pub business_units: Vec<String>,
    pub category: Option<PerformanceCategory>,
}

impl ViewFilters {
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

fn matches_search<'a>(term: &Option<String>, values: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    match term {
        None => true,
        Some(term) => values
            .into_iter()
            .flatten()
            .any(|v| v.to_lowercase().contains(term.as_str())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// Value counts, most frequent first, ties by label.
fn count_by<I>(labels: I) -> Vec<CountEntry>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut out: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveUsage {
    pub employee_name: String,
    pub total_availed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub total_headcount: usize,
    pub active_employees: usize,
    pub retention_rate: f64,
    pub on_probation: usize,
    pub headcount_by_business_unit: Vec<CountEntry>,
    pub top_leave_users: Vec<LeaveUsage>,
}

pub fn overview(data: &Datasets) -> OverviewView {
    let active = &data.active.records;
    let active_count = active.len();
    let total = active_count + data.inactive.len();
    let retention_rate = if total > 0 {
        active_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let mut leave: Vec<&LeaveSummary> = data.leave.records.iter().collect();
    leave.sort_by(|a, b| b.total_availed.total_cmp(&a.total_availed));
    OverviewView {
        notice: active.is_empty().then(|| NOT_LOADED.to_string()),
        total_headcount: total,
        active_employees: active_count,
        retention_rate,
        on_probation: active.iter().filter(|e| e.is_on_probation()).count(),
        headcount_by_business_unit: count_by(active.iter().map(|e| e.business_unit.clone())),
        top_leave_users: leave
            .into_iter()
            .take(TOP_LEAVE_USERS)
            .map(|l| LeaveUsage {
                employee_name: l.employee_name.clone(),
                total_availed: l.total_availed,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceRow {
    pub employee_name: String,
    pub designation: Option<String>,
    pub total_availed: f64,
    /// Keyed by `"{type} (Bal)"`.
    pub balances: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTypeTotal {
    pub leave_type: String,
    pub availed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub total_availed: f64,
    pub average_availed: f64,
    pub balances: Vec<LeaveBalanceRow>,
    pub type_breakdown: Vec<LeaveTypeTotal>,
}

pub fn leave(data: &Datasets, filters: &ViewFilters) -> LeaveView {
    let records = &data.leave.records;
    let total: f64 = records.iter().map(|l| l.total_availed).sum();
    let average = if records.is_empty() {
        0.0
    } else {
        total / records.len() as f64
    };
    let term = filters.search_term();
    let balances = records
        .iter()
        .map(|l| LeaveBalanceRow {
            employee_name: l.employee_name.clone(),
            designation: l.designation.clone(),
            total_availed: l.total_availed,
            balances: l
                .leave_types
                .iter()
                .filter(|t| t.tracks_balance)
                .map(|t| (format!("{} (Bal)", t.leave_type), t.balance))
                .collect(),
        })
        .filter(|row| {
            let total = format_number(row.total_availed);
            let balances: Vec<String> = row.balances.values().flatten().map(|v| format_number(*v)).collect();
            matches_search(
                &term,
                [Some(row.employee_name.as_str()), row.designation.as_deref(), Some(total.as_str())]
                    .into_iter()
                    .chain(balances.iter().map(|b| Some(b.as_str()))),
            )
        })
        .collect();

    let mut type_breakdown: Vec<LeaveTypeTotal> = Vec::new();
    for entry in records.iter().flat_map(|l| l.leave_types.iter()) {
        let availed = entry.availed.unwrap_or(0.0);
        match type_breakdown.iter_mut().find(|t| t.leave_type == entry.leave_type) {
            Some(t) => t.availed += availed,
            None => type_breakdown.push(LeaveTypeTotal {
                leave_type: entry.leave_type.clone(),
                availed,
            }),
        }
    }

    LeaveView {
        notice: records.is_empty().then(|| "Leave data not found.".to_string()),
        total_availed: total,
        average_availed: average,
        balances,
        type_breakdown,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub business_unit: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingLine {
    pub name: String,
    pub designation: Option<String>,
    pub business_unit: String,
    pub reporting_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub business_units: Vec<String>,
    pub hierarchy: Vec<HierarchyNode>,
    pub reporting_matrix: Vec<ReportingLine>,
}

pub fn org_structure(data: &Datasets, filters: &ViewFilters) -> OrgView {
    let active = &data.active.records;
    let mut groups: BTreeMap<(String, Option<String>, Option<String>), usize> = BTreeMap::new();
    for e in active {
        *groups
            .entry((e.business_unit.clone(), e.department.clone(), e.designation.clone()))
            .or_default() += 1;
    }
    let hierarchy = groups
        .into_iter()
        .map(|((business_unit, department, designation), count)| HierarchyNode {
            business_unit,
            department,
            designation,
            count,
        })
        .collect();

    let mut business_units: Vec<String> = Vec::new();
    for e in active {
        if !business_units.contains(&e.business_unit) {
            business_units.push(e.business_unit.clone());
        }
    }

    let mut reporting_matrix: Vec<ReportingLine> = active
        .iter()
        .filter(|e| filters.business_units.is_empty() || filters.business_units.contains(&e.business_unit))
        .map(|e| ReportingLine {
            name: e.name.clone(),
            designation: e.designation.clone(),
            business_unit: e.business_unit.clone(),
            reporting_to: e.reporting_to.clone(),
        })
        .collect();
    reporting_matrix.sort_by(|a, b| a.reporting_to.cmp(&b.reporting_to));

    OrgView {
        notice: active.is_empty().then(|| NOT_LOADED.to_string()),
        business_units,
        hierarchy,
        reporting_matrix,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinerRow {
    pub name: String,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub reporting_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// e.g. "March 2024"; `None` when no joining date parsed.
    pub latest_month: Option<String>,
    pub new_joiners: Vec<JoinerRow>,
    pub total_attrition: usize,
    pub exit_reasons: Vec<CountEntry>,
    pub exits: Vec<InactiveEmployee>,
}

pub fn movement(data: &Datasets) -> MovementView {
    let active = &data.active.records;
    let latest = active.iter().filter_map(|e| e.joining_date).max();
    let new_joiners = match latest {
        Some(max) => active
            .iter()
            .filter(|e| {
                e.joining_date
                    .is_some_and(|d| d.year() == max.year() && d.month() == max.month())
            })
            .map(|e| JoinerRow {
                name: e.name.clone(),
                designation: e.designation.clone(),
                department: e.department.clone(),
                joining_date: e.joining_date,
                reporting_to: e.reporting_to.clone(),
            })
            .collect(),
        None => Vec::new(),
    };
    let inactive = &data.inactive.records;
    MovementView {
        notice: active.is_empty().then(|| NOT_LOADED.to_string()),
        latest_month: latest.map(|d| d.format("%B %Y").to_string()),
        new_joiners,
        total_attrition: inactive.len(),
        exit_reasons: count_by(inactive.iter().filter_map(|e| e.reason.clone())),
        exits: inactive.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelCount {
    pub stage: FunnelStage,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub open_positions: usize,
    pub funnel: Vec<FunnelCount>,
    pub openings_by_business_unit: Vec<CountEntry>,
    pub requests: Vec<RecruitmentRequest>,
}

pub fn recruitment(data: &Datasets) -> RecruitmentView {
    let requests = &data.recruitment.records;
    let is_hired = |r: &RecruitmentRequest| r.funnel_stage == Some(FunnelStage::Hired);
    let hired = requests.iter().filter(|&r| is_hired(r)).count();
    let funnel = FunnelStage::ALL
        .iter()
        .map(|&stage| FunnelCount {
            stage,
            count: requests
                .iter()
                .filter(|r| r.funnel_stage == Some(stage))
                .count(),
        })
        .collect();
    RecruitmentView {
        notice: requests.is_empty().then(|| "Recruitment data not found.".to_string()),
        open_positions: requests.len() - hired,
        funnel,
        openings_by_business_unit: count_by(
            requests
                .iter()
                .filter(|&r| !is_hired(r))
                .filter_map(|r| r.business_unit.clone()),
        ),
        requests: requests.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub average_score: Option<f64>,
    pub high_performers: usize,
    pub evaluations: Vec<PerformanceEvaluation>,
}

pub fn performance(data: &Datasets, filters: &ViewFilters) -> PerformanceView {
    let evaluations = &data.performance.records;
    let scores: Vec<f64> = evaluations.iter().filter_map(|e| e.score).collect();
    let average_score = (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);
    PerformanceView {
        notice: evaluations.is_empty().then(|| "Performance data not found.".to_string()),
        average_score,
        high_performers: evaluations
            .iter()
            .filter(|e| e.category == PerformanceCategory::HighPerformer)
            .count(),
        evaluations: evaluations
            .iter()
            .filter(|e| filters.category.map_or(true, |c| e.category == c))
            .cloned()
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterFileView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub employees: Vec<ActiveEmployee>,
    pub probation: Vec<ActiveEmployee>,
}

pub fn master_file(data: &Datasets, filters: &ViewFilters) -> MasterFileView {
    let active = &data.active.records;
    let term = filters.search_term();
    let employees = active
        .iter()
        .filter(|e| {
            let joined = e.joining_date.map(|d| d.format("%Y-%m-%d").to_string());
            matches_search(
                &term,
                [
                    e.employee_number.as_deref(),
                    Some(e.name.as_str()),
                    e.designation.as_deref(),
                    e.department.as_deref(),
                    Some(e.business_unit.as_str()),
                    Some(e.reporting_to.as_str()),
                    joined.as_deref(),
                    e.cv_link.as_deref(),
                ],
            )
        })
        .cloned()
        .collect();
    MasterFileView {
        notice: active.is_empty().then(|| NOT_LOADED.to_string()),
        employees,
        probation: active.iter().filter(|e| e.is_on_probation()).cloned().collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub title: &'static str,
    pub summary: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoliciesView {
    pub approved: Vec<Policy>,
    pub drafts: Vec<&'static str>,
}

pub fn policies() -> PoliciesView {
    PoliciesView {
        approved: vec![
            Policy {
                title: "Annual Increment Policy",
                summary: "Eligibility: 12 Months service.",
            },
            Policy {
                title: "Recruitment Policy",
                summary: "KPI: Time to hire < 30 days.",
            },
            Policy {
                title: "Leave Policy",
                summary: "WFH: Allowed once a week.",
            },
            Policy {
                title: "Code of Conduct",
                summary: "Zero Tolerance Policy.",
            },
        ],
        drafts: vec!["AI Usage Policy"],
    }
}

/// Any section's view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum View {
    Overview(OverviewView),
    Leave(LeaveView),
    OrgStructure(OrgView),
    Movement(MovementView),
    Recruitment(RecruitmentView),
    Performance(PerformanceView),
    MasterFile(MasterFileView),
    Policies(PoliciesView),
}

pub fn build_view(section: Section, data: &Datasets, filters: &ViewFilters) -> View {
    match section {
        Section::Overview => View::Overview(overview(data)),
        Section::Leave => View::Leave(leave(data, filters)),
        Section::OrgStructure => View::OrgStructure(org_structure(data, filters)),
        Section::Movement => View::Movement(movement(data)),
        Section::Recruitment => View::Recruitment(recruitment(data)),
        Section::Performance => View::Performance(performance(data, filters)),
        Section::MasterFile => View::MasterFile(master_file(data, filters)),
        Section::Policies => View::Policies(policies()),
    }
}
