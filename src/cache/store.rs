//! Cache storage implementation.
//!
//! Entries live at `<root>/<digest>/<template base name>`. Freshness comes
//! from the payload's modification time; nothing is stored beside it.
//!
//! Writes overwrite the entry file in place rather than writing to a
//! temporary file and renaming, so a reader racing a writer on the same key
//! can observe a partially written payload.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::entry::{CacheEntry, EntryState};
use super::key::CacheKey;
use crate::error::{Result, VellumError};

/// Storage for rendered template output.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Root directory for cache.
    root: PathBuf,
    /// How long an entry stays fresh after it was written.
    lifetime: Duration,
}

impl CacheStore {
    /// Create a new cache store. Nothing is created on disk until the first write.
    pub fn new(root: impl Into<PathBuf>, lifetime_secs: u64) -> Self {
        Self {
            root: root.into(),
            lifetime: Duration::from_secs(lifetime_secs),
        }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the entry lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Full path of the entry for `key`.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Check whether a fresh entry exists for `key`.
    ///
    /// A missing entry, a failed stat, or an expired timestamp all yield
    /// `false`; this never errors.
    pub fn is_fresh(&self, key: &CacheKey) -> bool {
        self.is_fresh_at(key, SystemTime::now())
    }

    /// Same as [`is_fresh`](Self::is_fresh) against an explicit clock.
    pub fn is_fresh_at(&self, key: &CacheKey, now: SystemTime) -> bool {
        self.status_at(key, now) == EntryState::Fresh
    }

    /// Current state of the entry for `key`.
    pub fn status(&self, key: &CacheKey) -> EntryState {
        self.status_at(key, SystemTime::now())
    }

    /// State of the entry for `key` as seen at `now`.
    pub fn status_at(&self, key: &CacheKey, now: SystemTime) -> EntryState {
        match fs::metadata(self.entry_path(key)) {
            Ok(meta) if meta.is_file() => self.state_of(&meta, now),
            _ => EntryState::Absent,
        }
    }

    /// Fresh iff modified strictly after `now - lifetime`.
    fn state_of(&self, meta: &Metadata, now: SystemTime) -> EntryState {
        let Ok(modified) = meta.modified() else {
            return EntryState::Stale;
        };
        let cutoff = now.checked_sub(self.lifetime).unwrap_or(UNIX_EPOCH);

        if modified > cutoff {
            EntryState::Fresh
        } else {
            EntryState::Stale
        }
    }

    /// Read the cached payload for `key`.
    ///
    /// Returns `Ok(None)` if no entry exists. Any other failure is a
    /// [`VellumError::CacheRead`].
    pub fn read(&self, key: &CacheKey) -> Result<Option<String>> {
        let path = self.entry_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(VellumError::CacheRead { path, source }),
        }
    }

    /// Store `content` as the entry for `key`, replacing any prior payload.
    ///
    /// Returns the entry path.
    pub fn write(&self, key: &CacheKey, content: &str) -> Result<PathBuf> {
        ensure_writable_dir(&self.root).map_err(|message| VellumError::CacheDir {
            path: self.root.clone(),
            message,
        })?;

        let dir = self.root.join(key.digest());
        fs::create_dir_all(&dir).map_err(|source| VellumError::CacheWrite {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(key.file_name());
        fs::write(&path, content).map_err(|source| VellumError::CacheWrite {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }

    /// Remove everything under the cache root, leaving the root itself.
    ///
    /// Children are removed before their parent directory. The first entry
    /// that is read-only or cannot be removed aborts the clear with a
    /// [`VellumError::CacheClear`] naming it. Returns the number of removed
    /// files.
    pub fn clear_all(&self) -> Result<usize> {
        if !self.root.is_dir() {
            debug!("Cache root {} does not exist, nothing to clear", self.root.display());
            return Ok(0);
        }

        let removed = remove_children(&self.root)?;
        debug!("Cleared {} files from {}", removed, self.root.display());
        Ok(removed)
    }

    /// Whether the cache root holds nothing at all.
    ///
    /// A missing root counts as empty; an unreadable one does not.
    pub fn is_empty(&self) -> bool {
        match fs::read_dir(&self.root) {
            Ok(mut children) => children.next().is_none(),
            Err(e) => e.kind() == std::io::ErrorKind::NotFound,
        }
    }

    /// List all cached entries, newest first.
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let now = SystemTime::now();
        let mut entries = Vec::new();

        for dir in fs::read_dir(&self.root)? {
            let dir = dir?;
            if !dir.file_type()?.is_dir() {
                continue;
            }

            for file in fs::read_dir(dir.path())? {
                let file = file?;
                let meta = file.metadata()?;
                if !meta.is_file() {
                    continue;
                }

                entries.push(CacheEntry {
                    digest: dir.file_name().to_string_lossy().into_owned(),
                    template_name: file.file_name().to_string_lossy().into_owned(),
                    path: file.path(),
                    modified: DateTime::<Utc>::from(meta.modified()?),
                    size_bytes: meta.len(),
                    state: self.state_of(&meta, now),
                });
            }
        }

        entries.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(entries)
    }

    /// Get total cache size in bytes.
    pub fn total_size(&self) -> Result<u64> {
        let entries = self.entries()?;
        Ok(entries.iter().map(|e| e.size_bytes).sum())
    }
}

/// Make sure `dir` exists, is a directory, and is writable.
///
/// Creates it (and missing parents) when absent. The error is a
/// human-readable reason, left to the caller to wrap.
pub fn ensure_writable_dir(dir: &Path) -> std::result::Result<(), String> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| format!("unable to create directory: {}", e))?;
        debug!("Created cache directory {}", dir.display());
    }

    let meta = fs::metadata(dir).map_err(|e| e.to_string())?;
    if !meta.is_dir() {
        return Err("not a directory".to_string());
    }
    if meta.permissions().readonly() {
        return Err("directory is not writable".to_string());
    }

    Ok(())
}

fn remove_children(dir: &Path) -> Result<usize> {
    let mut removed = 0;

    for entry in fs::read_dir(dir).map_err(|e| clear_error(dir, e))? {
        let entry = entry.map_err(|e| clear_error(dir, e))?;
        let path = entry.path();
        let meta = fs::symlink_metadata(&path).map_err(|e| clear_error(&path, e))?;

        if meta.permissions().readonly() {
            return Err(VellumError::CacheClear {
                path,
                message: "entry is not writable".to_string(),
            });
        }

        if meta.is_dir() {
            removed += remove_children(&path)?;
            fs::remove_dir(&path).map_err(|e| clear_error(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| clear_error(&path, e))?;
            removed += 1;
        }
    }

    Ok(removed)
}

fn clear_error(path: &Path, e: std::io::Error) -> VellumError {
    VellumError::CacheClear {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
