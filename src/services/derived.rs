//! Per-row derived fields. All functions here are pure.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{FunnelStage, PerformanceCategory};
use crate::types::Row;

pub const HIGH_PERFORMER_MIN: f64 = 85.0;
pub const LOW_PERFORMER_BELOW: f64 = 70.0;

const AVAILED_SUFFIX: &str = "1";
const BALANCE_SUFFIX: &str = "2";

/// Funnel stage from a free-text status. Keywords are checked in priority order,
/// so "offer accepted, joining soon" is Hired.
pub fn funnel_stage(status: &str) -> FunnelStage {
    let text = status.to_lowercase();
    if text.contains("join") || text.contains("hired") {
        FunnelStage::Hired
    } else if text.contains("offer") {
        FunnelStage::OfferExtended
    } else if text.contains("interview") {
        FunnelStage::Interview
    } else if text.contains("shortlist") {
        FunnelStage::Shortlisted
    } else {
        FunnelStage::Applied
    }
}

pub fn performance_category(score: Option<f64>) -> PerformanceCategory {
    match score {
        None => PerformanceCategory::Pending,
        Some(s) if s >= HIGH_PERFORMER_MIN => PerformanceCategory::HighPerformer,
        Some(s) if s < LOW_PERFORMER_BELOW => PerformanceCategory::LowPerformer,
        Some(_) => PerformanceCategory::Average,
    }
}

fn suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<base>.+)\.(?P<n>[12])$").expect("valid regex"))
}

/// `("Casual", "1")` for `"Casual.1"`; `None` for columns without a `.1`/`.2` suffix.
fn split_suffix(column: &str) -> Option<(&str, &str)> {
    let caps = suffix_re().captures(column)?;
    Some((caps.name("base")?.as_str(), caps.name("n")?.as_str()))
}

pub fn is_availed_column(column: &str) -> bool {
    split_suffix(column).is_some_and(|(_, n)| n == AVAILED_SUFFIX)
}

/// Column positions of one leave type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveColumns {
    pub leave_type: String,
    pub entitled: Option<usize>,
    pub availed: Option<usize>,
    pub balance: Option<usize>,
}

/// Group suffixed columns into leave types, in order of first appearance.
pub fn leave_columns(columns: &[String]) -> Vec<LeaveColumns> {
    let mut out: Vec<LeaveColumns> = Vec::new();
    for (idx, column) in columns.iter().enumerate() {
        let Some((base, n)) = split_suffix(column) else {
            continue;
        };
        let pos = match out.iter().position(|l| l.leave_type == base) {
            Some(p) => p,
            None => {
                out.push(LeaveColumns {
                    leave_type: base.to_string(),
                    entitled: columns.iter().position(|c| c == base),
                    availed: None,
                    balance: None,
                });
                out.len() - 1
            }
        };
        match n {
            AVAILED_SUFFIX => out[pos].availed = Some(idx),
            BALANCE_SUFFIX => out[pos].balance = Some(idx),
            _ => {}
        }
    }
    out
}

/// Sum of every availed column in the row; non-numeric cells contribute 0, no columns gives 0.
pub fn total_availed(row: &Row<'_>) -> f64 {
    row.cells()
        .filter(|(column, _)| is_availed_column(column))
        .map(|(_, cell)| cell.as_number().unwrap_or(0.0))
        .sum()
}
