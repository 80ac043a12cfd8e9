//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::VellumConfig;
use crate::error::{Result, VellumError};

/// Location of the project config, relative to the project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(".vellum").join("config.yml")
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.vellum` directory (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(".vellum").is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<VellumConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VellumError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VellumError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<VellumConfig> {
    // An empty file is a valid, all-defaults config
    if content.trim().is_empty() {
        return Ok(VellumConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| VellumError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An override must exist. Without one, a missing project config yields
/// defaults. Relative paths in the config are resolved against
/// `project_root`.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<VellumConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => {
            let path = config_path(project_root);
            if path.is_file() {
                load_config_file(&path)?
            } else {
                debug!("No config at {}, using defaults", path.display());
                VellumConfig::default()
            }
        }
    };

    Ok(config.resolve_paths(project_root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, content: &str) {
        let dir = root.join(".vellum");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), content).unwrap();
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let temp = TempDir::new().unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert!(!config.view.caching);
        assert_eq!(config.view.cache_lifetime, 3000);
    }

    #[test]
    fn loads_project_config_and_resolves_paths() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "cache_dir: var/cache\npage_cache_dir: pages\nview:\n  caching: true\n",
        );

        let config = load_config(temp.path(), None).unwrap();
        assert!(config.view.caching);
        assert_eq!(
            config.page_cache_path(),
            Some(temp.path().join("var/cache").join("pages"))
        );
    }

    #[test]
    fn empty_config_file_is_default() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "");

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, VellumConfig::default());
    }

    #[test]
    fn missing_override_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");

        let result = load_config(temp.path(), Some(&path));
        assert!(matches!(result, Err(VellumError::ConfigNotFound { .. })));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "view: [unclosed");

        let result = load_config(temp.path(), None);
        assert!(matches!(result, Err(VellumError::ConfigParse { .. })));
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "{}");
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }
}
