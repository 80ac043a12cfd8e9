//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::render::parse_assignment;

use super::commands::cache::CacheArgs;

/// Vellum - Render templates through a time-limited page cache.
#[derive(Debug, Parser)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .vellum/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides discovery from the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Directory holding cached renders
    #[arg(long, global = true, env = "VELLUM_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Never prompt for confirmation
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template to stdout
    Render(RenderArgs),

    /// Inspect and manage the page cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RenderArgs {
    /// Template file, relative to the template directory
    pub template: PathBuf,

    /// Cache id distinguishing variants of the same template
    #[arg(long)]
    pub id: Option<String>,

    /// Template variable (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub vars: Vec<(String, String)>,

    /// Serve and store renders through the cache
    #[arg(long, conflicts_with = "no_cache")]
    pub cache: bool,

    /// Render without touching the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Cache lifetime (e.g. 50m, 2h, 3000)
    #[arg(long, value_name = "TTL")]
    pub ttl: Option<String>,

    /// Directory relative template paths resolve against
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

impl RenderArgs {
    /// Caching override requested on the command line, if any.
    pub fn caching_override(&self) -> Option<bool> {
        if self.cache {
            Some(true)
        } else if self.no_cache {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_with_variables() {
        let cli = Cli::try_parse_from([
            "vellum", "render", "home.tmpl", "--id", "page1", "--var", "title=Home", "--var",
            "user=ada", "--cache",
        ])
        .unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.template, PathBuf::from("home.tmpl"));
                assert_eq!(args.id.as_deref(), Some("page1"));
                assert_eq!(
                    args.vars,
                    vec![
                        ("title".to_string(), "Home".to_string()),
                        ("user".to_string(), "ada".to_string())
                    ]
                );
                assert_eq!(args.caching_override(), Some(true));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_variable() {
        let result = Cli::try_parse_from(["vellum", "render", "home.tmpl", "--var", "novalue"]);
        assert!(result.is_err());
    }

    #[test]
    fn cache_and_no_cache_conflict() {
        let result =
            Cli::try_parse_from(["vellum", "render", "home.tmpl", "--cache", "--no-cache"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_caching_override_by_default() {
        let args = RenderArgs::default();
        assert_eq!(args.caching_override(), None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vellum", "cache", "list", "--quiet", "--cache-dir", "/tmp/x"])
            .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/x")));
    }
}
