//! Cached template rendering.
//!
//! [`TemplateCache`] ties a [`Renderer`] to a [`CacheStore`]. With caching
//! off it simply renders. With caching on, a fresh entry is served from disk
//! and anything else is rendered and written back.
//!
//! Nothing here locks. Two callers missing the same key at once will both
//! render and both write; the last write wins. Entries are overwritten in
//! place, so a concurrent reader can observe a partially written page.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cache::{
    default_cache_dir, ensure_writable_dir, CacheKey, CacheStore, EntryState,
    DEFAULT_CACHE_LIFETIME,
};
use crate::config::VellumConfig;
use crate::error::{Result, VellumError};
use crate::render::{FileRenderer, Renderer, Variables};

/// Renders templates, optionally through a disk cache.
///
/// # Example
///
/// ```
/// use vellum::{TemplateCache, Variables};
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// std::fs::write(temp.path().join("home.tmpl"), "Hi ${name}").unwrap();
///
/// let mut view = TemplateCache::new();
/// view.set_template_dir(temp.path()).unwrap();
/// view.set_cache_dir(Some(temp.path().join("cache").as_path())).unwrap();
/// view.set_caching(true);
///
/// let vars = Variables::new().with("name", "Ada");
/// assert_eq!(view.fetch("home.tmpl", Some("page1"), &vars).unwrap(), "Hi Ada");
/// assert!(view.is_cached("home.tmpl", Some("page1")));
/// ```
#[derive(Debug)]
pub struct TemplateCache<R = FileRenderer> {
    renderer: R,
    template_dir: Option<PathBuf>,
    caching: bool,
    store: CacheStore,
    /// Fallback for `set_cache_dir(None)`, from the application config.
    app_cache_dir: Option<PathBuf>,
    /// Variables merged under every render's own variables.
    defaults: Variables,
}

impl TemplateCache<FileRenderer> {
    /// Create a cache around the bundled [`FileRenderer`].
    pub fn new() -> Self {
        Self::with_renderer(FileRenderer::new())
    }
}

impl Default for TemplateCache<FileRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> TemplateCache<R> {
    /// Create a cache with caching disabled and default settings.
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            template_dir: None,
            caching: false,
            store: CacheStore::new(default_cache_dir(), DEFAULT_CACHE_LIFETIME),
            app_cache_dir: None,
            defaults: Variables::new(),
        }
    }

    /// Build from loaded configuration.
    ///
    /// The template directory must exist. The cache directory is only
    /// created on the first write.
    pub fn from_config(config: &VellumConfig, renderer: R) -> Result<Self> {
        let mut view = Self::with_renderer(renderer);
        view.app_cache_dir = config.page_cache_path();
        view.defaults = config.variables.clone();

        if let Some(dir) = &config.view.template_dir {
            view.set_template_dir(dir)?;
        }

        let cache_dir = config
            .view
            .cache_dir
            .clone()
            .or_else(|| view.app_cache_dir.clone())
            .unwrap_or_else(default_cache_dir);
        view.store = CacheStore::new(cache_dir, config.view.cache_lifetime);
        view.caching = config.view.caching;

        Ok(view)
    }

    /// Set the base directory for relative template paths.
    pub fn set_template_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        match dir.canonicalize() {
            Ok(resolved) if resolved.is_dir() => {
                self.template_dir = Some(resolved);
                Ok(())
            }
            _ => Err(VellumError::Config {
                message: format!("template directory '{}' does not exist", dir.display()),
            }),
        }
    }

    /// Set the cache directory, creating it if needed.
    ///
    /// `None` falls back to the application's page cache directory, then to
    /// the platform cache directory. Fails if the directory cannot be
    /// created or is not writable.
    pub fn set_cache_dir(&mut self, dir: Option<&Path>) -> Result<()> {
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| self.app_cache_dir.clone())
            .unwrap_or_else(default_cache_dir);

        ensure_writable_dir(&dir).map_err(|reason| VellumError::Config {
            message: format!("cache directory '{}': {}", dir.display(), reason),
        })?;

        self.store = CacheStore::new(dir, self.cache_lifetime());
        Ok(())
    }

    /// Set how many seconds a cached render stays fresh.
    pub fn set_cache_lifetime(&mut self, seconds: u64) {
        self.store = CacheStore::new(self.store.root(), seconds);
    }

    /// Turn caching on or off.
    pub fn set_caching(&mut self, enabled: bool) {
        self.caching = enabled;
    }

    /// Replace the variables merged into every render.
    pub fn set_default_variables(&mut self, variables: Variables) {
        self.defaults = variables;
    }

    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    pub fn cache_dir(&self) -> &Path {
        self.store.root()
    }

    /// Cache lifetime in seconds.
    pub fn cache_lifetime(&self) -> u64 {
        self.store.lifetime().as_secs()
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Resolve `file` against the template directory.
    pub fn resolve_template(&self, file: &Path) -> PathBuf {
        match &self.template_dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.to_path_buf(),
        }
    }

    /// Cache key for `file` under `id`.
    pub fn cache_key(&self, file: impl AsRef<Path>, id: Option<&str>) -> Result<CacheKey> {
        CacheKey::for_template(file.as_ref(), id)
    }

    /// Render `file` and return the output, going through the cache when
    /// caching is enabled.
    ///
    /// A fresh entry that cannot be read back is a
    /// [`VellumError::CacheRead`]; it does not trigger a re-render.
    pub fn fetch(
        &self,
        file: impl AsRef<Path>,
        id: Option<&str>,
        variables: &Variables,
    ) -> Result<String> {
        let template = self.resolve_template(file.as_ref());

        if !self.caching {
            return self.render_template(&template, variables);
        }

        let key = CacheKey::for_template(&template, id)?;

        if self.store.is_fresh(&key) {
            debug!("Cache hit for {}", template.display());
            return self.store.read(&key)?.ok_or_else(|| {
                let path = self.store.entry_path(&key);
                warn!("Fresh cache entry {} vanished before it was read", path.display());
                VellumError::CacheRead {
                    path,
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        "entry disappeared after freshness check",
                    ),
                }
            });
        }

        debug!("Cache miss for {}", template.display());
        let output = self.render_template(&template, variables)?;
        self.store.write(&key, &output)?;
        Ok(output)
    }

    /// Fetch and write the output to stdout.
    pub fn render(
        &self,
        file: impl AsRef<Path>,
        id: Option<&str>,
        variables: &Variables,
    ) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render_to(&mut out, file, id, variables)
    }

    /// Fetch and write the output to `out`.
    pub fn render_to<W: Write>(
        &self,
        out: &mut W,
        file: impl AsRef<Path>,
        id: Option<&str>,
        variables: &Variables,
    ) -> Result<()> {
        let output = self.fetch(file, id, variables)?;
        out.write_all(output.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Stored output for `file` under `id`, fresh or not, without rendering.
    pub fn fetch_cached(&self, file: impl AsRef<Path>, id: Option<&str>) -> Result<Option<String>> {
        let key = self.cache_key(file, id)?;
        self.store.read(&key)
    }

    /// Check whether a fresh cached render exists for `file` under `id`.
    pub fn is_cached(&self, file: impl AsRef<Path>, id: Option<&str>) -> bool {
        self.cache_key(file, id)
            .map(|key| self.store.is_fresh(&key))
            .unwrap_or(false)
    }

    /// Entry state for `file` under `id`.
    pub fn status(&self, file: impl AsRef<Path>, id: Option<&str>) -> EntryState {
        self.cache_key(file, id)
            .map(|key| self.store.status(&key))
            .unwrap_or(EntryState::Absent)
    }

    /// Delete every cached render. Returns the number of removed files.
    pub fn clear_cache(&self) -> Result<usize> {
        self.store.clear_all()
    }

    fn render_template(&self, template: &Path, variables: &Variables) -> Result<String> {
        if self.defaults.is_empty() {
            return self.renderer.render(template, variables);
        }

        let mut merged = self.defaults.clone();
        merged.extend(variables.clone());
        self.renderer.render(template, &merged)
    }
}
