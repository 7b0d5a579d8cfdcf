//! Runs every dataset through open → resolve → normalize, isolating failures per dataset.

use crate::config::{
    Config, ACTIVE_SHEET, INACTIVE_SHEET, LEAVE_HEADER_ROW, LEAVE_SHEET, PERFORMANCE_SHEET,
    RECRUITMENT_SHEET,
};
use crate::error::LoadError;
use crate::excel::{Grid, Workbook};
use crate::models::{ActiveEmployee, Dataset, Datasets};
use crate::services::header_resolver::{resolve_header_row, ROSTER_HEADER_LABELS};
use crate::services::locator::{read_sources, SourceContent, Sources};
use crate::services::normalizer::{self, Normalized};
use std::panic::{self, AssertUnwindSafe};

/// Read the sources named by `config` and build all datasets.
pub fn load_all(config: &Config) -> Datasets {
    load_datasets(&read_sources(config), config)
}

/// Build all datasets from already-read sources.
pub fn load_datasets(sources: &Sources, config: &Config) -> Datasets {
    let mut datasets = Datasets::default();
    load_roster(&sources.roster, config, &mut datasets);
    datasets.recruitment = load_sheet(
        &sources.recruitment,
        &config.recruitment_file,
        RECRUITMENT_SHEET,
        |grid| normalizer::normalize_recruitment(grid),
    );
    datasets.performance = load_sheet(
        &sources.performance,
        &config.performance_file,
        PERFORMANCE_SHEET,
        |grid| normalizer::normalize_performance(grid),
    );
    datasets.leave = load_sheet(&sources.leave, &config.leave_file, LEAVE_SHEET, |grid| {
        normalizer::normalize_leave(grid, LEAVE_HEADER_ROW)
    });
    log::info!(
        "loaded active={} inactive={} recruitment={} performance={} leave={}",
        datasets.active.len(),
        datasets.inactive.len(),
        datasets.recruitment.len(),
        datasets.performance.len(),
        datasets.leave.len()
    );
    datasets
}

fn open_bytes<'a>(content: &'a SourceContent, file: &str) -> Result<Option<&'a [u8]>, LoadError> {
    match content {
        SourceContent::Absent => Ok(None),
        SourceContent::Unreadable { reason } => Err(LoadError::Open {
            file: file.to_string(),
            reason: reason.clone(),
        }),
        SourceContent::Present { bytes } => Ok(Some(bytes.as_slice())),
    }
}

/// Run one dataset's work so that a panic inside it fails that dataset only.
fn isolate<R>(source_name: &str, work: impl FnOnce() -> Result<R, LoadError>) -> Result<R, LoadError> {
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(LoadError::Panicked {
            source_name: source_name.to_string(),
            reason,
        })
    })
}

fn finish<T>(sheet: &str, result: Normalized<T>) -> Dataset<T> {
    if let Err(e) = &result {
        log::warn!("'{}' degraded to empty: {}", sheet, e);
    }
    Dataset::from_result(result)
}

fn load_sheet<T, F>(content: &SourceContent, file: &str, sheet: &str, normalize: F) -> Dataset<T>
where
    F: FnOnce(&Grid) -> Normalized<T>,
{
    let bytes = match open_bytes(content, file) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Dataset::absent(),
        Err(e) => return finish(sheet, Err(e)),
    };
    let result = isolate(sheet, || {
        Workbook::open(file, bytes)
            .and_then(|mut wb| wb.sheet_grid(sheet))
            .and_then(|grid| normalize(&grid))
    });
    finish(sheet, result)
}

/// Active staff: resolve the header within the first rows, then reread with it.
fn load_active(wb: &mut Workbook<'_>, scan_rows: usize) -> Normalized<ActiveEmployee> {
    let head = wb.sheet_head(ACTIVE_SHEET, scan_rows)?;
    let header_row = resolve_header_row(&head, scan_rows, &ROSTER_HEADER_LABELS).ok_or_else(|| {
        LoadError::HeaderNotFound {
            sheet: ACTIVE_SHEET.to_string(),
            scanned: scan_rows,
            labels: ROSTER_HEADER_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    })?;
    log::debug!("'{}' header resolved at row index {}", ACTIVE_SHEET, header_row);
    let grid = wb.sheet_grid(ACTIVE_SHEET)?;
    normalizer::normalize_active(&grid, header_row)
}

/// The roster workbook is opened once and feeds both the active and inactive datasets.
fn load_roster(content: &SourceContent, config: &Config, datasets: &mut Datasets) {
    let file = &config.roster_file;
    let opened = isolate(file, || {
        open_bytes(content, file).and_then(|bytes| bytes.map(|b| Workbook::open(file, b)).transpose())
    });
    let mut wb = match opened {
        Ok(Some(wb)) => wb,
        Ok(None) => {
            datasets.active = Dataset::absent();
            datasets.inactive = Dataset::absent();
            return;
        }
        Err(e) => {
            log::error!("Error loading Master File: {}", e);
            datasets.warnings.push(format!("Error loading Master File: {}", e));
            datasets.active = Dataset::failed(&e);
            datasets.inactive = Dataset::failed(&e);
            return;
        }
    };

    let active = isolate(ACTIVE_SHEET, || load_active(&mut wb, config.header_scan_rows));
    if let Err(e) = &active {
        log::error!("Error loading Master File: {}", e);
        datasets.warnings.push(format!("Error loading Master File: {}", e));
    }
    datasets.active = Dataset::from_result(active);

    let inactive = isolate(INACTIVE_SHEET, || {
        wb.sheet_grid(INACTIVE_SHEET)
            .and_then(|grid| normalizer::normalize_inactive(&grid))
    });
    datasets.inactive = finish(INACTIVE_SHEET, inactive);
}
