//! Vellum - Template rendering with a time-limited page cache.
//!
//! Vellum renders template files and, when caching is enabled, keeps each
//! rendered page on disk under a digest of its cache id and template name.
//! A page written within the cache lifetime is served from disk instead of
//! being rendered again.
//!
//! # Modules
//!
//! - [`cache`] - Cache keys, the on-disk store and entry freshness
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and parsing
//! - [`error`] - Error types and result aliases
//! - [`render`] - The renderer seam and `${var}` file templates
//! - [`ui`] - Terminal output and confirmations
//! - [`view`] - The caching template front end
//!
//! # Example
//!
//! ```
//! use vellum::{TemplateCache, Variables};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("home.tmpl"), "Hello ${name}").unwrap();
//!
//! let mut view = TemplateCache::new();
//! view.set_template_dir(dir.path()).unwrap();
//! view.set_cache_dir(Some(dir.path().join("cache").as_path())).unwrap();
//! view.set_caching(true);
//!
//! let vars = Variables::new().with("name", "Ada");
//! assert_eq!(view.fetch("home.tmpl", Some("page1"), &vars).unwrap(), "Hello Ada");
//! assert!(view.is_cached("home.tmpl", Some("page1")));
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod ui;
pub mod view;

pub use cache::{CacheKey, CacheStore, EntryState};
pub use error::{Result, VellumError};
pub use render::{FileRenderer, Renderer, Variables};
pub use view::TemplateCache;
