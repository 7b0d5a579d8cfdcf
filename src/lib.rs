//! Workbook loading, normalization and section views for the HR dashboard.

pub mod cache;
pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod models;
pub mod services;
pub mod types;

pub use cache::{global_cache, LoadCache};
pub use config::Config;
pub use error::LoadError;
pub use models::{Dataset, DatasetStatus, Datasets};
pub use services::loader::{load_all, load_datasets};
pub use services::views::{build_view, Section, View, ViewFilters};
