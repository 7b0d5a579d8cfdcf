//! Locating the header row of sheets whose header position is not fixed.

use crate::models::{EMPLOYEE_NUMBER, NAME};
use crate::types::Cell;

/// Labels that must both appear in the roster's header row.
pub const ROSTER_HEADER_LABELS: [&str; 2] = [EMPLOYEE_NUMBER, NAME];

/// Index of the first row among the first `scan_rows` whose cells include every label in `labels`.
/// Rows are compared cell by cell on their display text; the earliest match wins.
pub fn resolve_header_row(head: &[Vec<Cell>], scan_rows: usize, labels: &[&str]) -> Option<usize> {
    head.iter().take(scan_rows).position(|row| {
        labels
            .iter()
            .all(|label| row.iter().any(|cell| cell.as_label() == *label))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| if v.is_empty() { Cell::Empty } else { Cell::text(v) })
            .collect()
    }

    fn filler(n: usize) -> Vec<Vec<Cell>> {
        (0..n).map(|i| row(&["Falkenherz Group", &format!("title {}", i)])).collect()
    }

    #[test]
    fn finds_header_at_row_seven() {
        let mut head = filler(7);
        head.push(row(&["S.No", "Employee Number", "Name", "Designation"]));
        head.extend(filler(7));
        assert_eq!(head.len(), 15);
        assert_eq!(resolve_header_row(&head, 15, &ROSTER_HEADER_LABELS), Some(7));
    }

    #[test]
    fn first_qualifying_row_wins() {
        let mut head = filler(2);
        head.push(row(&["Name", "Employee Number"]));
        head.push(row(&["Employee Number", "Name"]));
        assert_eq!(resolve_header_row(&head, 15, &ROSTER_HEADER_LABELS), Some(2));
    }

    #[test]
    fn both_labels_required() {
        let mut head = filler(3);
        head.push(row(&["Employee Number", "Full Name"]));
        head.push(row(&["Name"]));
        assert_eq!(resolve_header_row(&head, 15, &ROSTER_HEADER_LABELS), None);
    }

    #[test]
    fn rows_beyond_scan_window_are_ignored() {
        let mut head = filler(15);
        head.push(row(&["Employee Number", "Name"]));
        assert_eq!(resolve_header_row(&head, 15, &ROSTER_HEADER_LABELS), None);
        assert_eq!(resolve_header_row(&head, 16, &ROSTER_HEADER_LABELS), Some(15));
    }

    #[test]
    fn labels_must_match_whole_cells() {
        let head = vec![row(&["Employee Number (HR)", "Name of employee"])];
        assert_eq!(resolve_header_row(&head, 15, &ROSTER_HEADER_LABELS), None);
    }
}
