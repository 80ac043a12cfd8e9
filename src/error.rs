//! Error types for vellum operations.
//!
//! This module defines [`VellumError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every filesystem or render failure surfaces as a typed variant naming
//!   the offending path; nothing is retried or swallowed
//! - Expected cache misses are not errors (see [`crate::cache::CacheStore::is_fresh`])
//! - Use `anyhow::Error` (via `VellumError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for vellum operations.
#[derive(Debug, Error)]
pub enum VellumError {
    /// Bad template or cache directory at setup time.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Template is missing or could not be rendered.
    #[error("Failed to render template {path}: {message}")]
    Render { path: PathBuf, message: String },

    /// Cache root is missing, cannot be created, or is not writable.
    #[error("Cache directory {path} is unusable: {message}")]
    CacheDir { path: PathBuf, message: String },

    /// A cache entry exists but could not be read.
    #[error("Failed to read cache entry {path}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cache entry could not be written.
    #[error("Failed to write cache entry {path}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Clearing the cache stopped at an entry that could not be removed.
    #[error("Unable to remove {path}: {message}")]
    CacheClear { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for vellum operations.
pub type Result<T> = std::result::Result<T, VellumError>;
