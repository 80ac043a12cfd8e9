//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for settings shared by every command
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, VellumConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for status output and confirmations
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit status for the process; codes outside `0..=255` become 1.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Project location and global overrides shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Project root config and relative paths resolve against.
    pub project_root: PathBuf,
    /// Explicit config file.
    pub config_override: Option<PathBuf>,
    /// Explicit cache directory.
    pub cache_dir: Option<PathBuf>,
}

impl CommandContext {
    /// Create a context for `project_root` without overrides.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Load the project configuration.
    pub fn load_config(&self) -> Result<VellumConfig> {
        load_config(&self.project_root, self.config_override.as_deref())
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            context: CommandContext::new(project_root),
        }
    }

    /// Create a dispatcher from an explicit context.
    pub fn with_context(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Render(args) => {
                let cmd = super::render::RenderCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Cache(args) => {
                let cmd = super::cache::CacheCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn exit_status_does_not_wrap() {
        assert_eq!(CommandResult::success().exit_status(), 0);
        assert_eq!(CommandResult::failure(2).exit_status(), 2);
        assert_eq!(CommandResult::failure(256).exit_status(), 1);
        assert_eq!(CommandResult::failure(-1).exit_status(), 1);
    }

    #[test]
    fn dispatcher_exposes_project_root() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/tmp/site"));
        assert_eq!(dispatcher.project_root(), Path::new("/tmp/site"));
    }

    #[test]
    fn context_loads_project_config() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".vellum")).unwrap();
        fs::write(
            temp.path().join(".vellum/config.yml"),
            "view:\n  cache_lifetime: 60\n",
        )
        .unwrap();

        let config = CommandContext::new(temp.path()).load_config().unwrap();
        assert_eq!(config.view.cache_lifetime, 60);
    }

    #[test]
    fn context_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = CommandContext::new(temp.path()).load_config().unwrap();
        assert!(!config.view.caching);
    }
}
