//! Cache entry and state types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Freshness of a single cache entry.
///
/// An entry moves `Absent → Fresh` on write, `Fresh → Stale` once the
/// lifetime elapses, and back to `Fresh` on the next write. Only a full
/// clear returns it to `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    /// No entry file exists.
    Absent,
    /// Entry was written within the cache lifetime.
    Fresh,
    /// Entry exists but is older than the cache lifetime.
    Stale,
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Absent => "absent",
            Self::Fresh => "fresh",
            Self::Stale => "stale",
        };
        f.write_str(label)
    }
}

/// A cached render found on disk.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    /// Digest directory the entry lives in.
    pub digest: String,
    /// Template base name (the entry's file name).
    pub template_name: String,
    /// Full path to the cached payload.
    pub path: PathBuf,
    /// Last modification time of the payload.
    pub modified: DateTime<Utc>,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Freshness at the time the entry was listed.
    pub state: EntryState,
}

impl CacheEntry {
    /// Get the age of this entry.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.modified)
    }

    /// Whether the entry was fresh when listed.
    pub fn is_fresh(&self) -> bool {
        self.state == EntryState::Fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(state: EntryState) -> CacheEntry {
        CacheEntry {
            digest: "bc5c929207c87f56fed878a30c49bd05".to_string(),
            template_name: "home.tmpl".to_string(),
            path: PathBuf::from("/tmp/cache/bc5c929207c87f56fed878a30c49bd05/home.tmpl"),
            modified: Utc::now(),
            size_bytes: 12,
            state,
        }
    }

    #[test]
    fn state_display() {
        assert_eq!(EntryState::Absent.to_string(), "absent");
        assert_eq!(EntryState::Fresh.to_string(), "fresh");
        assert_eq!(EntryState::Stale.to_string(), "stale");
    }

    #[test]
    fn fresh_entry_reports_fresh() {
        assert!(entry(EntryState::Fresh).is_fresh());
        assert!(!entry(EntryState::Stale).is_fresh());
    }

    #[test]
    fn entry_age_is_small_when_just_modified() {
        assert!(entry(EntryState::Fresh).age().num_seconds() < 1);
    }

    #[test]
    fn entry_serializes_state_lowercase() {
        let json = serde_json::to_string(&entry(EntryState::Stale)).unwrap();
        assert!(json.contains("\"state\":\"stale\""));
        assert!(json.contains("\"template_name\":\"home.tmpl\""));
    }
}
