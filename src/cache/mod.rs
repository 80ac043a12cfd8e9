//! Rendered-output caching.
//!
//! This module provides disk-based caching of rendered templates with
//! TTL-based freshness. Each entry is stored at
//! `<cache dir>/<md5 digest>/<template base name>`, where the digest covers
//! the optional cache id followed by the template's base name.

pub mod entry;
pub mod key;
pub mod store;
pub mod ttl;

pub use entry::{CacheEntry, EntryState};
pub use key::{base_name, CacheKey};
pub use store::{ensure_writable_dir, CacheStore};
pub use ttl::{format_duration, parse_ttl, parse_ttl_secs};

/// Default lifetime of a cache entry, in seconds.
pub const DEFAULT_CACHE_LIFETIME: u64 = 3000;

/// Get the platform default cache directory.
///
/// Used when neither an explicit cache directory nor the application's
/// `cache_dir`/`page_cache_dir` pair is configured.
pub fn default_cache_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("vellum")
        .join("pages")
}
