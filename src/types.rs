use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A single worksheet value, decoupled from the reader library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }

    /// Empty cells and whitespace-only text count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display form used for header labels, search and label matching.
    /// Integral numbers render without a fractional part.
    pub fn as_label(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            Cell::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    dt.date().format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }

    /// Non-blank label, or `None`.
    pub fn as_opt_string(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.as_label())
        }
    }

    /// Numeric coercion: numbers pass through, numeric text is parsed, everything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Excel serial day number (1900 date system) to a date-time.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Rectangular view of a sheet: labelled columns plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table using `grid[header_row]` as labels and every non-blank row after it as data.
    pub fn from_grid(grid: &[Vec<Cell>], header_row: usize) -> Table {
        let Some(header) = grid.get(header_row) else {
            return Table::default();
        };
        let width = grid
            .iter()
            .skip(header_row)
            .map(|r| r.len())
            .max()
            .unwrap_or(0);
        let labels: Vec<String> = (0..width)
            .map(|i| {
                let label = header.get(i).map(Cell::as_label).unwrap_or_default();
                if label.is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    label
                }
            })
            .collect();
        let columns = dedupe_labels(labels);
        let rows = grid
            .iter()
            .skip(header_row + 1)
            .filter(|row| row.iter().any(|c| !c.is_blank()))
            .map(|row| {
                let mut cells = row.clone();
                cells.resize(width, Cell::Empty);
                cells
            })
            .collect();
        Table { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn rename_column(&mut self, index: usize, name: &str) {
        if let Some(col) = self.columns.get_mut(index) {
            *col = name.to_string();
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { table: self, cells })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Borrowed row with by-name access.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [Cell],
}

static EMPTY: Cell = Cell::Empty;

impl<'a> Row<'a> {
    /// Cell under `column`, or `Cell::Empty` when the column does not exist.
    pub fn get(&self, column: &str) -> &'a Cell {
        self.table
            .column_index(column)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&EMPTY)
    }

    pub fn string(&self, column: &str) -> Option<String> {
        self.get(column).as_opt_string()
    }

    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> {
        self.table
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}

/// Disambiguate repeated labels: `A, A, A` becomes `A, A.1, A.2`, never colliding with an existing label.
pub fn dedupe_labels(labels: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(labels.len());
    for label in labels {
        let name = if taken.contains(&label) {
            let mut n = next_suffix.get(&label).copied().unwrap_or(1);
            let mut candidate = format!("{}.{}", label, n);
            while taken.contains(&candidate) {
                n += 1;
                candidate = format!("{}.{}", label, n);
            }
            next_suffix.insert(label, n + 1);
            candidate
        } else {
            label
        };
        taken.insert(name.clone());
        out.push(name);
    }
    out
}
