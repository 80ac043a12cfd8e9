//! Cache command implementation.
//!
//! Provides `vellum cache status`, `vellum cache list` and `vellum cache clear`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cache::format_duration;
use crate::config::VellumConfig;
use crate::render::FileRenderer;
use crate::ui::UserInterface;
use crate::view::TemplateCache;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show whether a template has a fresh cached render.
    Status {
        /// Template file.
        template: PathBuf,
        /// Cache id the render was stored under.
        #[arg(long)]
        id: Option<String>,
    },
    /// List cached entries.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Clear the cache.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
}

/// The cache command implementation.
pub struct CacheCommand {
    context: CommandContext,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(context: CommandContext, args: CacheArgs) -> Self {
        Self { context, args }
    }

    /// Template cache for inspection only; the template directory is
    /// never consulted, so it need not exist.
    fn template_cache(&self) -> crate::error::Result<TemplateCache> {
        let mut config: VellumConfig = self.context.load_config()?;
        config.view.template_dir = None;
        if let Some(dir) = &self.context.cache_dir {
            config.view.cache_dir = Some(dir.clone());
        }
        TemplateCache::from_config(&config, FileRenderer::new())
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let view = self.template_cache()?;

        let exit_code = match &self.args.command {
            CacheSubcommand::Status { template, id } => {
                show_status(&view, template, id.as_deref(), ui)?
            }
            CacheSubcommand::List { json } => list_cache(&view, *json, ui)?,
            CacheSubcommand::Clear { force } => clear_cache(&view, *force, ui)?,
        };

        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn show_status(
    view: &TemplateCache,
    template: &std::path::Path,
    id: Option<&str>,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let key = view.cache_key(template, id)?;
    let state = view.status(template, id);

    ui.message(&format!("{}: {}", key.file_name(), state));
    ui.message(&format!("  Path: {}", view.store().entry_path(&key).display()));
    ui.message(&format!(
        "  Lifetime: {}",
        format_duration(chrono::Duration::seconds(view.cache_lifetime() as i64))
    ));

    Ok(0)
}

fn list_cache(view: &TemplateCache, json: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    let entries = view.store().entries()?;

    if json {
        let output = serde_json::to_string_pretty(&entries)?;
        ui.message(&output);
        return Ok(0);
    }

    if entries.is_empty() {
        ui.message("Cache is empty");
        return Ok(0);
    }

    ui.message(&format!("{} cached entries:\n", entries.len()));

    for entry in &entries {
        ui.message(&format!(
            "  {}/{} [{}] {} old, {} bytes",
            entry.digest,
            entry.template_name,
            entry.state,
            format_duration(entry.age()),
            entry.size_bytes
        ));
    }

    let total_size = view.store().total_size()?;
    ui.message(&format!("\n  Total size: {} bytes", total_size));
    ui.message(&format!("  Location: {}", view.cache_dir().display()));

    Ok(0)
}

fn clear_cache(view: &TemplateCache, force: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    if view.store().is_empty() {
        ui.message("Cache is already empty");
        return Ok(0);
    }

    if !force {
        // Non-interactive runs clear unless VELLUM_CONFIRM_CLEAR_CACHE says no
        let default = !ui.is_interactive();
        let question = match view.store().entries() {
            Ok(entries) if !entries.is_empty() => {
                format!("Clear {} cached entries?", entries.len())
            }
            _ => format!("Clear everything under {}?", view.cache_dir().display()),
        };
        if !ui.confirm("clear_cache", &question, default)? {
            ui.message("Cancelled");
            return Ok(0);
        }
    }

    let cleared = view.clear_cache()?;
    ui.success(&format!("Cleared {} entries", cleared));

    Ok(0)
}
