//! Print the first rows of a worksheet with column letters and the resolved roster header row.
//! Useful when a workbook's layout changes and a dataset starts loading empty.

use clap::Parser;
use hr_dashboard_lib::config::DEFAULT_HEADER_SCAN_ROWS;
use hr_dashboard_lib::excel::{col_index_to_letter, Workbook};
use hr_dashboard_lib::logging;
use hr_dashboard_lib::services::header_resolver::{resolve_header_row, ROSTER_HEADER_LABELS};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "dump_sheet", about = "Dump the top of a worksheet")]
struct Args {
    /// Workbook path
    file: PathBuf,

    /// Sheet name; lists sheets when omitted
    sheet: Option<String>,

    /// Rows to print
    #[arg(long, default_value_t = DEFAULT_HEADER_SCAN_ROWS)]
    rows: usize,
}

fn run(args: Args) -> Result<(), String> {
    let bytes = std::fs::read(&args.file).map_err(|e| format!("Could not read file: {}", e))?;
    let file = args.file.display().to_string();
    let mut wb = Workbook::open(&file, &bytes).map_err(|e| e.to_string())?;

    let Some(sheet) = args.sheet else {
        for name in wb.sheet_names() {
            println!("{}", name);
        }
        return Ok(());
    };

    let head = wb.sheet_head(&sheet, args.rows).map_err(|e| e.to_string())?;
    for (i, row) in head.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_blank())
            .map(|(col, c)| format!("{}={:?}", col_index_to_letter(col as u32), c.as_label()))
            .collect();
        println!("{:>4}: {}", i, cells.join("  "));
    }
    match resolve_header_row(&head, args.rows, &ROSTER_HEADER_LABELS) {
        Some(idx) => println!("roster header row index: {}", idx),
        None => println!("roster header row: not found in {} rows", args.rows),
    }
    Ok(())
}

fn main() -> ExitCode {
    logging::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
