use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::NaiveDateTime;
use std::io::Cursor;

use crate::error::LoadError;
use crate::types::{excel_serial_to_datetime, Cell};

/// Rows of cells, indexed by absolute sheet position (row 0 is the sheet's first row).
pub type Grid = Vec<Vec<Cell>>;

/// Column index to Excel letter (0→A, 1→B, 25→Z, 26→AA).
pub fn col_index_to_letter(index: u32) -> String {
    let mut n = index;
    let mut s = String::new();
    loop {
        let r = (n % 26) as u8;
        s.insert(0, (b'A' + r) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    s
}

/// Workbook opened over bytes already read from disk.
pub struct Workbook<'a> {
    sheets: Sheets<Cursor<&'a [u8]>>,
}

impl<'a> Workbook<'a> {
    pub fn open(file: &str, bytes: &'a [u8]) -> Result<Self, LoadError> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| LoadError::Open {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Workbook { sheets })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    /// Whole sheet as a grid.
    pub fn sheet_grid(&mut self, sheet: &str) -> Result<Grid, LoadError> {
        self.read_grid(sheet, None)
    }

    /// First `max_rows` rows of a sheet, read without assuming any header.
    pub fn sheet_head(&mut self, sheet: &str, max_rows: usize) -> Result<Grid, LoadError> {
        self.read_grid(sheet, Some(max_rows))
    }

    fn read_grid(&mut self, sheet: &str, max_rows: Option<usize>) -> Result<Grid, LoadError> {
        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|e| LoadError::SheetNotFound {
                sheet: sheet.to_string(),
                reason: e.to_string(),
            })?;
        let Some((start_row, start_col)) = range.start() else {
            return Ok(Vec::new());
        };
        // calamine ranges begin at the first used cell; pad so indices match the sheet.
        let mut grid: Grid = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            if max_rows.is_some_and(|m| grid.len() >= m) {
                break;
            }
            let mut cells = vec![Cell::Empty; start_col as usize];
            cells.extend(row.iter().map(cell_from_data));
            grid.push(cells);
        }
        if let Some(m) = max_rows {
            grid.truncate(m);
        }
        Ok(grid)
    }
}

pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(Cell::DateTime)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(Cell::DateTime)
            .unwrap_or_else(|_| Cell::Text(s.clone())),
    }
}
