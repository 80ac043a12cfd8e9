//! Cache key derivation.

use md5::{Digest, Md5};
use std::path::{Path, PathBuf};

use crate::error::{Result, VellumError};

/// Identifies one cache entry: a digest directory plus the template's base name.
///
/// Two templates with the same base name rendered under different cache ids
/// land in different digest directories, so they never share a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    digest: String,
    file_name: String,
}

impl CacheKey {
    /// Derive a key from an optional cache id and a template base name.
    pub fn new(id: Option<&str>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let digest = match id {
            Some(id) => Md5::digest(format!("{}{}", id, file_name).as_bytes()),
            None => Md5::digest(file_name.as_bytes()),
        };

        Self {
            digest: hex::encode(digest),
            file_name,
        }
    }

    /// Derive a key for a template path.
    ///
    /// Only the final path component takes part in the key, so the same
    /// template reached through different directories maps to one entry.
    pub fn for_template(template: &Path, id: Option<&str>) -> Result<Self> {
        Ok(Self::new(id, base_name(template)?))
    }

    /// Hex-encoded 128-bit digest, used as the entry's directory name.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Template base name, used as the entry's file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Entry path relative to the cache root: `<digest>/<file_name>`.
    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.digest).join(&self.file_name)
    }
}

/// Final component of a template path.
pub fn base_name(template: &Path) -> Result<String> {
    template
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| VellumError::Render {
            path: template.to_path_buf(),
            message: "template path has no file name".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        let a = CacheKey::new(Some("page1"), "home.tmpl");
        let b = CacheKey::new(Some("page1"), "home.tmpl");
        assert_eq!(a, b);
    }

    #[test]
    fn digest_matches_md5_of_id_and_name() {
        let key = CacheKey::new(Some("page1"), "home.tmpl");
        assert_eq!(key.digest(), "ca73b2ae18762197ad9696ab039bd2de");
    }

    #[test]
    fn digest_without_id_hashes_name_only() {
        let key = CacheKey::new(None, "home.tmpl");
        assert_eq!(key.digest(), "bc5c929207c87f56fed878a30c49bd05");
    }

    #[test]
    fn digest_is_fixed_width_hex() {
        let key = CacheKey::new(Some("a rather long / odd id"), "x.tmpl");
        assert_eq!(key.digest().len(), 32);
        assert!(key.digest().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_ids_give_different_digests() {
        let a = CacheKey::new(Some("page1"), "home.tmpl");
        let b = CacheKey::new(Some("page2"), "home.tmpl");
        let c = CacheKey::new(None, "home.tmpl");
        assert_ne!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
        assert_eq!(a.file_name(), b.file_name());
    }

    #[test]
    fn different_names_give_different_digests() {
        let a = CacheKey::new(Some("page1"), "home.tmpl");
        let b = CacheKey::new(Some("page1"), "about.tmpl");
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn for_template_uses_base_name() {
        let a = CacheKey::for_template(Path::new("/srv/views/home.tmpl"), Some("page1")).unwrap();
        let b = CacheKey::for_template(Path::new("home.tmpl"), Some("page1")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.file_name(), "home.tmpl");
    }

    #[test]
    fn relative_path_has_two_levels() {
        let key = CacheKey::new(None, "home.tmpl");
        assert_eq!(
            key.relative_path(),
            Path::new("bc5c929207c87f56fed878a30c49bd05").join("home.tmpl")
        );
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let result = CacheKey::for_template(Path::new("/"), None);
        assert!(matches!(result, Err(VellumError::Render { .. })));
    }
}
