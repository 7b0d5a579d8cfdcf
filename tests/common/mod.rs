#![allow(dead_code)]

use hr_dashboard_lib::config::{
    Config, ACTIVE_SHEET, INACTIVE_SHEET, LEAVE_SHEET, PERFORMANCE_SHEET, RECRUITMENT_SHEET,
};
use hr_dashboard_lib::types::Cell;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::TempDir;

pub fn t(s: &str) -> Cell {
    Cell::text(s)
}

pub fn n(v: f64) -> Cell {
    Cell::Number(v)
}

pub fn e() -> Cell {
    Cell::Empty
}

/// Write `sheets` into a new workbook at `path`. `Cell::Empty` leaves the cell untouched.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Text(s) => {
                        sheet.write_string(r, c, s.as_str()).unwrap();
                    }
                    Cell::Number(v) => {
                        sheet.write_number(r, c, *v).unwrap();
                    }
                    Cell::Bool(b) => {
                        sheet.write_boolean(r, c, *b).unwrap();
                    }
                    Cell::Empty | Cell::DateTime(_) => {}
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

pub fn active_rows(title_rows: usize) -> Vec<Vec<Cell>> {
    let mut rows: Vec<Vec<Cell>> = (0..title_rows)
        .map(|i| {
            if i < 2 {
                vec![]
            } else {
                vec![t("Falkenherz Group"), t("Employee Master - Lahore Office")]
            }
        })
        .collect();
    rows.push(vec![
        t("Employee Number"),
        t("Name"),
        t("Designation"),
        t("Department"),
        t("Business Unit"),
        t("Reporting To"),
        t("Joining Date"),
        t("Employment Status"),
        t("Profiles"),
    ]);
    rows.push(vec![
        t("FHZ-001"),
        t("Ayesha Khan"),
        t("Software Engineer"),
        t("Tech"),
        t("Voltro"),
        t("Bilal Ahmed"),
        t("2024-03-15"),
        t("Permanent"),
        t("https://cv.example/ayesha"),
    ]);
    rows.push(vec![
        t("FHZ-002"),
        t("Omar Farooq"),
        t("Accountant"),
        t("Finance"),
        e(),
        e(),
        n(45352.0),
        t("Probation"),
    ]);
    rows.push(vec![t("Employee Number"), t("Name")]);
    rows.push(vec![t("FHZ-003"), e(), t("Intern")]);
    rows.push(vec![
        t("FHZ-004"),
        t("Hina Raza"),
        t("Pilot"),
        t("Ops"),
        t("JetClass"),
        e(),
        t("sometime"),
        t("Permanent"),
    ]);
    rows
}

pub fn inactive_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![t("Name"), t("Designation"), t("Exit Date"), t("Reason")],
        vec![t("Sana Iqbal"), t("HR Officer"), t("2024-02-29"), t("Relocation")],
        vec![t("Usman Ali"), t("Driver"), t("n/a"), t("Better Offer")],
    ]
}

pub fn recruitment_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![t("BU"), t("Position"), t("Status"), t("Standing"), t("Request By")],
        vec![t("Voltro"), t("Sales Lead"), t("Closed"), t("Offer accepted, joining soon"), t("CEO")],
        vec![t("FAMS"), t("Accountant"), t("Open"), t("Interview round 2"), t("CFO")],
        vec![t("JetClass"), t("Pilot"), t("Open"), t("CVs shortlisted"), t("COO")],
        vec![t("Voltro"), t("Designer"), t("Open"), e(), t("CEO")],
    ]
}

pub fn performance_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![t("Name"), t("Total Points (Out of 100)"), t("Evaluated By")],
        vec![t("Ayesha Khan"), n(85.0), t("Bilal Ahmed")],
        vec![t("Omar Farooq"), n(70.0), t("Bilal Ahmed")],
        vec![t("Hina Raza"), n(69.999), t("COO")],
        vec![t("New Joiner"), t("pending"), e()],
    ]
}

pub fn leave_rows(identity_label: &str) -> Vec<Vec<Cell>> {
    vec![
        vec![t("Leave Record - 2025")],
        vec![
            t("S.No"),
            t(identity_label),
            t("Designation"),
            t("Casual"),
            t("Casual"),
            t("Casual"),
            t("Sick"),
            t("Sick"),
            t("Sick"),
            t("Annual"),
            t("Annual"),
            t("Annual"),
        ],
        vec![
            n(1.0),
            t("Ayesha Khan"),
            t("Software Engineer"),
            n(10.0),
            n(3.0),
            n(7.0),
            n(8.0),
            t("x"),
            n(8.0),
            n(14.0),
            n(2.0),
            n(12.0),
        ],
        vec![n(2.0), t("Omar Farooq"), t("Accountant"), n(10.0), n(1.0), n(9.0)],
        vec![n(3.0), e(), t("Vacant")],
    ]
}

/// All four workbooks in a fresh directory.
pub fn full_fixture() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_data_dir(dir.path());
    write_roster(&config, active_rows(4));
    write_workbook(
        &config.path_for(&config.recruitment_file),
        &[(RECRUITMENT_SHEET, recruitment_rows())],
    );
    write_workbook(
        &config.path_for(&config.performance_file),
        &[(PERFORMANCE_SHEET, performance_rows())],
    );
    write_workbook(
        &config.path_for(&config.leave_file),
        &[(LEAVE_SHEET, leave_rows("Employee Name"))],
    );
    (dir, config)
}

pub fn write_roster(config: &Config, active: Vec<Vec<Cell>>) {
    write_workbook(
        &config.path_for(&config.roster_file),
        &[(ACTIVE_SHEET, active), (INACTIVE_SHEET, inactive_rows())],
    );
}
