//! Finding and reading the four source workbooks.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Roster,
    Recruitment,
    Performance,
    Leave,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Roster,
        SourceKind::Recruitment,
        SourceKind::Performance,
        SourceKind::Leave,
    ];

    pub fn file_name<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            SourceKind::Roster => &config.roster_file,
            SourceKind::Recruitment => &config.recruitment_file,
            SourceKind::Performance => &config.performance_file,
            SourceKind::Leave => &config.leave_file,
        }
    }
}

/// Presence of one expected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Located {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub present: bool,
}

/// Check each expected file without opening any of them.
pub fn locate(config: &Config) -> Vec<Located> {
    SourceKind::ALL
        .iter()
        .map(|&kind| {
            let path = config.path_for(kind.file_name(config));
            let present = path.is_file();
            Located { kind, path, present }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    Absent,
    Unreadable { reason: String },
    Present { bytes: Vec<u8> },
}

/// Raw bytes of every source, read once per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub roster: SourceContent,
    pub recruitment: SourceContent,
    pub performance: SourceContent,
    pub leave: SourceContent,
}

impl Sources {
    pub fn get(&self, kind: SourceKind) -> &SourceContent {
        match kind {
            SourceKind::Roster => &self.roster,
            SourceKind::Recruitment => &self.recruitment,
            SourceKind::Performance => &self.performance,
            SourceKind::Leave => &self.leave,
        }
    }
}

fn read_one(located: &Located) -> SourceContent {
    if !located.present {
        log::debug!("{:?} source not found at {}", located.kind, located.path.display());
        return SourceContent::Absent;
    }
    match fs::read(&located.path) {
        Ok(bytes) => SourceContent::Present { bytes },
        // Removed between the check and the read.
        Err(e) if e.kind() == io::ErrorKind::NotFound => SourceContent::Absent,
        Err(e) => SourceContent::Unreadable {
            reason: format!("Could not read file: {}", e),
        },
    }
}

pub fn read_sources(config: &Config) -> Sources {
    let located = locate(config);
    let content = |kind: SourceKind| {
        located
            .iter()
            .find(|l| l.kind == kind)
            .map(read_one)
            .unwrap_or(SourceContent::Absent)
    };
    Sources {
        roster: content(SourceKind::Roster),
        recruitment: content(SourceKind::Recruitment),
        performance: content(SourceKind::Performance),
        leave: content(SourceKind::Leave),
    }
}
