use thiserror::Error;

/// Failure while reading or normalizing one dataset. Never escapes the dataset it belongs to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("Could not open workbook '{file}': {reason}")]
    Open { file: String, reason: String },

    #[error("Sheet '{sheet}' not found: {reason}")]
    SheetNotFound { sheet: String, reason: String },

    #[error("No row in the first {scanned} rows of '{sheet}' contains both {labels:?}")]
    HeaderNotFound {
        sheet: String,
        scanned: usize,
        labels: Vec<String>,
    },

    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Sheet '{sheet}' has no column at position {index}")]
    NoColumnAt { sheet: String, index: usize },

    #[error("Reading '{source_name}' panicked: {reason}")]
    Panicked { source_name: String, reason: String },
}
