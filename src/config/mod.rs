//! Configuration loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use vellum::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".vellum");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "view:\n  caching: true\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(config.view.caching);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{config_path, find_project_root, load_config, load_config_file, parse_config};
pub use schema::{VellumConfig, ViewSettings};
