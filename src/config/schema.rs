//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_CACHE_LIFETIME;
use crate::render::Variables;

/// Root configuration, read from `.vellum/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VellumConfig {
    /// Application cache root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Page cache directory, inside `cache_dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_cache_dir: Option<PathBuf>,

    /// Template cache settings.
    #[serde(default)]
    pub view: ViewSettings,

    /// Variables available to every render.
    #[serde(default, skip_serializing_if = "Variables::is_empty")]
    pub variables: Variables,
}

impl VellumConfig {
    /// Page cache location from the `cache_dir` + `page_cache_dir` pair.
    ///
    /// Returns `None` unless both keys are set.
    pub fn page_cache_path(&self) -> Option<PathBuf> {
        match (&self.cache_dir, &self.page_cache_dir) {
            (Some(root), Some(pages)) => Some(root.join(pages)),
            _ => None,
        }
    }

    /// Resolve every relative path in the config against `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };

        self.cache_dir = self.cache_dir.map(resolve);
        self.view.template_dir = self.view.template_dir.map(resolve);
        self.view.cache_dir = self.view.cache_dir.map(resolve);
        self
    }
}

/// Settings owned by a [`TemplateCache`](crate::TemplateCache).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewSettings {
    /// Base directory for relative template paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Explicit cache directory; overrides the application pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Seconds a cached render stays fresh.
    #[serde(default = "default_cache_lifetime")]
    pub cache_lifetime: u64,

    /// Whether rendered output is cached at all.
    #[serde(default)]
    pub caching: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            template_dir: None,
            cache_dir: None,
            cache_lifetime: DEFAULT_CACHE_LIFETIME,
            caching: false,
        }
    }
}

fn default_cache_lifetime() -> u64 {
    DEFAULT_CACHE_LIFETIME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_settings_defaults() {
        let settings = ViewSettings::default();
        assert_eq!(settings.cache_lifetime, 3000);
        assert!(!settings.caching);
        assert!(settings.template_dir.is_none());
        assert!(settings.cache_dir.is_none());
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: VellumConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, VellumConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
cache_dir: var/cache
page_cache_dir: pages
view:
  template_dir: templates
  cache_lifetime: 60
  caching: true
variables:
  site: Example
"#;
        let config: VellumConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.view.cache_lifetime, 60);
        assert!(config.view.caching);
        assert_eq!(config.variables.get("site"), Some("Example"));
        assert_eq!(
            config.page_cache_path(),
            Some(PathBuf::from("var/cache/pages"))
        );
    }

    #[test]
    fn page_cache_path_needs_both_keys() {
        let config = VellumConfig {
            cache_dir: Some(PathBuf::from("var/cache")),
            ..Default::default()
        };
        assert!(config.page_cache_path().is_none());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<VellumConfig, _> = serde_yaml::from_str("cache_ttl: 5");
        assert!(result.is_err());
    }

    #[test]
    fn resolve_paths_joins_relative_only() {
        let config = VellumConfig {
            cache_dir: Some(PathBuf::from("var/cache")),
            page_cache_dir: Some(PathBuf::from("pages")),
            view: ViewSettings {
                template_dir: Some(PathBuf::from("/abs/templates")),
                ..Default::default()
            },
            ..Default::default()
        }
        .resolve_paths(Path::new("/project"));

        assert_eq!(config.cache_dir, Some(PathBuf::from("/project/var/cache")));
        assert_eq!(
            config.view.template_dir,
            Some(PathBuf::from("/abs/templates"))
        );
        assert_eq!(
            config.page_cache_path(),
            Some(PathBuf::from("/project/var/cache/pages"))
        );
    }
}
