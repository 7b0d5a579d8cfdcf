use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::{Arc, OnceLock, RwLock};

use crate::config::Config;
use crate::models::Datasets;
use crate::services::loader::load_datasets;
use crate::services::locator::{read_sources, SourceContent, SourceKind, Sources};

/// Identity of one load: the settings that shape it plus a digest per source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFingerprint {
    pub settings: String,
    pub files: Vec<(SourceKind, String)>,
}

impl SourceFingerprint {
    pub fn of(sources: &Sources, config: &Config) -> Self {
        let settings = format!(
            "{}|{}|{}|{}|{}|{}",
            config.data_dir.display(),
            config.roster_file,
            config.recruitment_file,
            config.performance_file,
            config.leave_file,
            config.header_scan_rows
        );
        let files = SourceKind::ALL
            .iter()
            .map(|&kind| (kind, content_digest(sources.get(kind))))
            .collect();
        SourceFingerprint { settings, files }
    }
}

fn content_digest(content: &SourceContent) -> String {
    match content {
        SourceContent::Absent => "absent".to_string(),
        SourceContent::Unreadable { reason } => format!("unreadable:{}", reason),
        SourceContent::Present { bytes } => format!("{:x}", Sha256::digest(bytes)),
    }
}

/// Last load result, reused while the sources are byte-identical.
#[derive(Default)]
pub struct LoadCache {
    entry: RwLock<Option<(SourceFingerprint, Arc<Datasets>)>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the sources and return the cached datasets if they are unchanged, otherwise rebuild.
    pub fn get_or_load(&self, config: &Config) -> Arc<Datasets> {
        let sources = read_sources(config);
        let key = SourceFingerprint::of(&sources, config);
        if let Some(hit) = self.lookup(&key) {
            log::debug!("sources unchanged; reusing cached datasets");
            return hit;
        }
        let datasets = Arc::new(load_datasets(&sources, config));
        if let Ok(mut guard) = self.entry.write() {
            *guard = Some((key, Arc::clone(&datasets)));
        }
        datasets
    }

    fn lookup(&self, key: &SourceFingerprint) -> Option<Arc<Datasets>> {
        let guard = self.entry.read().ok()?;
        match guard.as_ref() {
            Some((cached, datasets)) if cached == key => Some(Arc::clone(datasets)),
            _ => None,
        }
    }

    pub fn fingerprint(&self) -> Option<SourceFingerprint> {
        let guard = self.entry.read().ok()?;
        guard.as_ref().map(|(key, _)| key.clone())
    }

    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.entry.write() {
            *guard = None;
        }
    }
}

static CACHE: OnceLock<LoadCache> = OnceLock::new();

/// Process-wide cache used by the binaries.
pub fn global_cache() -> &'static LoadCache {
    CACHE.get_or_init(LoadCache::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unchanged_sources_hit_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(dir.path());
        let cache = LoadCache::new();

        let first = cache.get_or_load(&config);
        let second = cache.get_or_load(&config);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.active.is_absent());
    }

    #[test]
    fn content_change_and_invalidate_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(dir.path());
        let cache = LoadCache::new();

        let first = cache.get_or_load(&config);
        let before = cache.fingerprint().unwrap();
        fs::write(config.path_for(&config.leave_file), b"not really a workbook").unwrap();
        let second = cache.get_or_load(&config);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_ne!(cache.fingerprint().unwrap(), before);
        assert!(second.leave.is_failed());

        cache.invalidate();
        assert!(cache.fingerprint().is_none());
        let third = cache.get_or_load(&config);
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(*second, *third);
    }
}
