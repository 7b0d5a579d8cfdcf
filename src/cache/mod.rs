pub mod load_cache;

pub use load_cache::{global_cache, LoadCache, SourceFingerprint};
