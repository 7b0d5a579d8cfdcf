use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ROSTER_FILE: &str = "Employee Master Sheet - Lahore Office.xlsx";
pub const RECRUITMENT_FILE: &str = "Hirings Requests UAE & PK.xlsx";
pub const PERFORMANCE_FILE: &str = "Increment - Lahore Office _ Apr - Sep 25.xlsx";
pub const LEAVE_FILE: &str = "Leave Record - 2025.xlsx";

pub const ACTIVE_SHEET: &str = "Active Staff";
pub const INACTIVE_SHEET: &str = "Inactive Staff";
pub const RECRUITMENT_SHEET: &str = "Progress";
pub const PERFORMANCE_SHEET: &str = "Evaluation Data";
pub const LEAVE_SHEET: &str = "Summary";

/// Rows of the active-staff sheet searched for the header.
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 15;
/// The leave summary has a title row above its header.
pub const LEAVE_HEADER_ROW: usize = 1;
const DEFAULT_DECOR_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub roster_file: String,
    pub recruitment_file: String,
    pub performance_file: String,
    pub leave_file: String,
    pub header_scan_rows: usize,
    pub decor_urls: Vec<String>,
    pub decor_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("."),
            roster_file: ROSTER_FILE.to_string(),
            recruitment_file: RECRUITMENT_FILE.to_string(),
            performance_file: PERFORMANCE_FILE.to_string(),
            leave_file: LEAVE_FILE.to_string(),
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            decor_urls: Vec::new(),
            decor_timeout: Duration::from_secs(DEFAULT_DECOR_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Defaults rooted at `dir`.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: dir.into(),
            ..Config::default()
        }
    }

    /// Load `.env` (if any) and apply `HR_DASHBOARD_*` overrides on top of the defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();
        if let Some(dir) = get("HR_DASHBOARD_DATA_DIR") {
            config.data_dir = expand_home(&dir);
        }
        if let Some(name) = get("HR_DASHBOARD_ROSTER_FILE") {
            config.roster_file = name;
        }
        if let Some(name) = get("HR_DASHBOARD_RECRUITMENT_FILE") {
            config.recruitment_file = name;
        }
        if let Some(name) = get("HR_DASHBOARD_PERFORMANCE_FILE") {
            config.performance_file = name;
        }
        if let Some(name) = get("HR_DASHBOARD_LEAVE_FILE") {
            config.leave_file = name;
        }
        if let Some(rows) = get("HR_DASHBOARD_HEADER_SCAN_ROWS").and_then(|v| v.parse::<usize>().ok()) {
            if rows > 0 {
                config.header_scan_rows = rows;
            }
        }
        if let Some(urls) = get("HR_DASHBOARD_DECOR_URLS") {
            config.decor_urls = urls
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(secs) = get("HR_DASHBOARD_DECOR_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            config.decor_timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(raw).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let env: HashMap<&str, &str> = [
            ("HR_DASHBOARD_DATA_DIR", "/srv/hr"),
            ("HR_DASHBOARD_LEAVE_FILE", "Leave Record - 2026.xlsx"),
            ("HR_DASHBOARD_HEADER_SCAN_ROWS", "20"),
            ("HR_DASHBOARD_DECOR_URLS", "https://a.example/x.json, ,https://b.example/y.json"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/srv/hr"));
        assert_eq!(config.leave_file, "Leave Record - 2026.xlsx");
        assert_eq!(config.roster_file, ROSTER_FILE);
        assert_eq!(config.header_scan_rows, 20);
        assert_eq!(config.decor_urls.len(), 2);
    }

    #[test]
    fn invalid_numbers_keep_defaults() {
        let config = Config::from_lookup(|k| match k {
            "HR_DASHBOARD_HEADER_SCAN_ROWS" => Some("0".to_string()),
            "HR_DASHBOARD_DECOR_TIMEOUT_SECS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.header_scan_rows, DEFAULT_HEADER_SCAN_ROWS);
        assert_eq!(config.decor_timeout, Duration::from_secs(3));
    }
}
