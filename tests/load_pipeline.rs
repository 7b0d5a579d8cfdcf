mod common;

use chrono::NaiveDate;
use common::*;
use hr_dashboard_lib::config::{ACTIVE_SHEET, INACTIVE_SHEET, LEAVE_SHEET, PERFORMANCE_SHEET};
use hr_dashboard_lib::models::{DatasetStatus, FunnelStage, PerformanceCategory};
use hr_dashboard_lib::services::normalizer::{DEFAULT_BUSINESS_UNIT, DEFAULT_REPORTING_TO};
use hr_dashboard_lib::{load_all, Config};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn full_load_normalizes_every_dataset() {
    let (_dir, config) = full_fixture();
    let data = load_all(&config);

    assert!(data.warnings.is_empty(), "{:?}", data.warnings);
    for status in [
        &data.active.status,
        &data.inactive.status,
        &data.recruitment.status,
        &data.performance.status,
        &data.leave.status,
    ] {
        assert_eq!(*status, DatasetStatus::Loaded);
    }

    let names: Vec<&str> = data.active.records.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ayesha Khan", "Omar Farooq", "Hina Raza"]);
    let omar = &data.active.records[1];
    assert_eq!(omar.business_unit, DEFAULT_BUSINESS_UNIT);
    assert_eq!(omar.reporting_to, DEFAULT_REPORTING_TO);
    assert_eq!(omar.joining_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert!(omar.is_on_probation());
    assert_eq!(data.active.records[0].cv_link.as_deref(), Some("https://cv.example/ayesha"));
    assert_eq!(data.active.records[2].joining_date, None);

    assert_eq!(data.inactive.len(), 2);
    assert_eq!(data.inactive.records[0].exit_date, NaiveDate::from_ymd_opt(2024, 2, 29));
    assert_eq!(data.inactive.records[1].exit_date, None);

    let stages: Vec<_> = data.recruitment.records.iter().map(|r| r.funnel_stage).collect();
    assert_eq!(
        stages,
        vec![
            Some(FunnelStage::Hired),
            Some(FunnelStage::Interview),
            Some(FunnelStage::Shortlisted),
            Some(FunnelStage::Applied),
        ]
    );

    let categories: Vec<_> = data.performance.records.iter().map(|p| p.category).collect();
    assert_eq!(
        categories,
        vec![
            PerformanceCategory::HighPerformer,
            PerformanceCategory::Average,
            PerformanceCategory::LowPerformer,
            PerformanceCategory::Pending,
        ]
    );

    let totals: Vec<(&str, f64)> = data
        .leave
        .records
        .iter()
        .map(|l| (l.employee_name.as_str(), l.total_availed))
        .collect();
    assert_eq!(totals, vec![("Ayesha Khan", 5.0), ("Omar Farooq", 1.0)]);
    assert_eq!(data.leave.schema.unmatched, vec!["S.No".to_string()]);
}

#[test]
fn missing_recruitment_workbook_only_empties_recruitment() {
    let (_dir, config) = full_fixture();
    let before = load_all(&config);
    fs::remove_file(config.path_for(&config.recruitment_file)).unwrap();
    let after = load_all(&config);

    assert!(after.recruitment.is_empty());
    assert!(after.recruitment.is_absent());
    assert_eq!(after.active, before.active);
    assert_eq!(after.inactive, before.inactive);
    assert_eq!(after.performance, before.performance);
    assert_eq!(after.leave, before.leave);
}

#[test]
fn empty_directory_yields_absent_datasets() {
    let dir = tempfile::tempdir().unwrap();
    let data = load_all(&Config::with_data_dir(dir.path()));
    assert!(data.active.is_absent());
    assert!(data.inactive.is_absent());
    assert!(data.recruitment.is_absent());
    assert!(data.performance.is_absent());
    assert!(data.leave.is_absent());
    assert!(data.warnings.is_empty());
}

#[test]
fn header_resolved_below_title_rows() {
    let (_dir, config) = full_fixture();
    write_roster(&config, active_rows(7));
    let data = load_all(&config);
    assert_eq!(data.active.status, DatasetStatus::Loaded);
    assert_eq!(data.active.len(), 3);
}

#[test]
fn unresolvable_header_empties_active_with_warning() {
    let (_dir, config) = full_fixture();
    // Header pushed past the 15-row scan window.
    write_roster(&config, active_rows(15));
    let data = load_all(&config);

    assert!(data.active.is_empty());
    assert!(data.active.is_failed());
    assert_eq!(data.warnings.len(), 1);
    assert!(data.warnings[0].contains(ACTIVE_SHEET));
    assert_eq!(data.inactive.len(), 2);
    assert_eq!(data.leave.len(), 2);
}

#[test]
fn wider_scan_window_finds_deep_header() {
    let (_dir, mut config) = full_fixture();
    write_roster(&config, active_rows(15));
    config.header_scan_rows = 20;
    assert_eq!(load_all(&config).active.len(), 3);
}

#[test]
fn malformed_leave_file_does_not_affect_others() {
    let (_dir, config) = full_fixture();
    fs::write(config.path_for(&config.leave_file), b"PK\x03\x04 truncated").unwrap();
    let data = load_all(&config);

    assert!(data.leave.is_failed());
    assert!(data.leave.is_empty());
    assert_eq!(data.active.len(), 3);
    assert_eq!(data.recruitment.len(), 4);
    assert_eq!(data.performance.len(), 4);
    assert!(data.warnings.is_empty());
}

#[test]
fn missing_sheet_fails_only_that_dataset() {
    let (_dir, config) = full_fixture();
    write_workbook(
        &config.path_for(&config.roster_file),
        &[(ACTIVE_SHEET, active_rows(0))],
    );
    let data = load_all(&config);
    assert_eq!(data.active.len(), 3);
    assert!(data.inactive.is_failed());
    match &data.inactive.status {
        DatasetStatus::Failed { reason } => assert!(reason.contains(INACTIVE_SHEET)),
        other => panic!("unexpected status {:?}", other),
    }
}

#[test]
fn performance_sheet_without_score_column_is_empty() {
    let (_dir, config) = full_fixture();
    write_workbook(
        &config.path_for(&config.performance_file),
        &[(
            PERFORMANCE_SHEET,
            vec![
                vec![t("Name"), t("Evaluated By")],
                vec![t("Ayesha Khan"), t("Bilal Ahmed")],
            ],
        )],
    );
    let data = load_all(&config);

    assert!(data.performance.is_empty());
    assert!(data.performance.is_failed());
    match &data.performance.status {
        DatasetStatus::Failed { reason } => assert!(reason.contains("Total Points (Out of 100)")),
        other => panic!("unexpected status {:?}", other),
    }
    assert_eq!(data.active.len(), 3);
    assert!(data.warnings.is_empty());
}

#[test]
fn leave_identity_column_renamed_from_second_position() {
    let (_dir, config) = full_fixture();
    write_workbook(
        &config.path_for(&config.leave_file),
        &[(LEAVE_SHEET, leave_rows("Staff Member"))],
    );
    let data = load_all(&config);
    let names: Vec<&str> = data.leave.records.iter().map(|l| l.employee_name.as_str()).collect();
    assert_eq!(names, vec!["Ayesha Khan", "Omar Farooq"]);
}

#[test]
fn repeated_loads_are_identical() {
    let (_dir, config) = full_fixture();
    let first = load_all(&config);
    let second = load_all(&config);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
