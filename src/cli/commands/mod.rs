//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations with a shared [`CommandContext`]
//! carrying the project root and global overrides.

pub mod cache;
pub mod completions;
pub mod dispatcher;
pub mod render;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
