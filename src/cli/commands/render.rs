//! Render command implementation.
//!
//! `vellum render <TEMPLATE>` writes the rendered template to stdout.

use tracing::debug;

use crate::cache::parse_ttl_secs;
use crate::cli::args::RenderArgs;
use crate::config::VellumConfig;
use crate::error::Result;
use crate::render::{FileRenderer, Variables};
use crate::ui::UserInterface;
use crate::view::TemplateCache;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The render command implementation.
pub struct RenderCommand {
    context: CommandContext,
    args: RenderArgs,
}

impl RenderCommand {
    /// Create a new render command.
    pub fn new(context: CommandContext, args: RenderArgs) -> Self {
        Self { context, args }
    }

    /// Project configuration with command-line overrides applied.
    fn effective_config(&self) -> Result<VellumConfig> {
        let mut config = self.context.load_config()?;

        if let Some(dir) = &self.args.template_dir {
            config.view.template_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.context.cache_dir {
            config.view.cache_dir = Some(dir.clone());
        }
        if let Some(ttl) = &self.args.ttl {
            config.view.cache_lifetime = parse_ttl_secs(ttl)?;
        }
        if let Some(caching) = self.args.caching_override() {
            config.view.caching = caching;
        }

        Ok(config)
    }

    /// Build the template cache this command renders through.
    pub fn template_cache(&self) -> Result<TemplateCache> {
        let config = self.effective_config()?;
        TemplateCache::from_config(&config, FileRenderer::new())
    }

    fn variables(&self) -> Variables {
        self.args.vars.iter().cloned().collect()
    }
}

impl Command for RenderCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let view = self.template_cache()?;
        debug!(
            "Rendering {} (caching: {}, cache dir: {})",
            self.args.template.display(),
            view.caching_enabled(),
            view.cache_dir().display()
        );

        view.render(&self.args.template, self.args.id.as_deref(), &self.variables())?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use crate::VellumError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project_with_template() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("templates")).unwrap();
        fs::write(temp.path().join("templates/home.tmpl"), "Hello ${name}").unwrap();
        fs::create_dir_all(temp.path().join(".vellum")).unwrap();
        fs::write(
            temp.path().join(".vellum/config.yml"),
            "view:\n  template_dir: templates\n  cache_dir: cache\n",
        )
        .unwrap();
        temp
    }

    fn args(template: &str) -> RenderArgs {
        RenderArgs {
            template: PathBuf::from(template),
            ..Default::default()
        }
    }

    #[test]
    fn overrides_apply_on_top_of_config() {
        let temp = project_with_template();
        let mut render_args = args("home.tmpl");
        render_args.ttl = Some("2m".to_string());
        render_args.cache = true;

        let cmd = RenderCommand::new(CommandContext::new(temp.path()), render_args);
        let view = cmd.template_cache().unwrap();

        assert!(view.caching_enabled());
        assert_eq!(view.cache_lifetime(), 120);
        assert_eq!(view.cache_dir(), temp.path().join("cache"));
    }

    #[test]
    fn context_cache_dir_wins_over_config() {
        let temp = project_with_template();
        let mut context = CommandContext::new(temp.path());
        context.cache_dir = Some(temp.path().join("elsewhere"));

        let cmd = RenderCommand::new(context, args("home.tmpl"));
        let view = cmd.template_cache().unwrap();

        assert_eq!(view.cache_dir(), temp.path().join("elsewhere"));
    }

    #[test]
    fn invalid_ttl_is_an_error() {
        let temp = project_with_template();
        let mut render_args = args("home.tmpl");
        render_args.ttl = Some("soon".to_string());

        let cmd = RenderCommand::new(CommandContext::new(temp.path()), render_args);
        assert!(cmd.template_cache().is_err());
    }

    #[test]
    fn cached_render_writes_entry() {
        let temp = project_with_template();
        let mut render_args = args("home.tmpl");
        render_args.cache = true;
        render_args.id = Some("page1".to_string());
        render_args.vars = vec![("name".to_string(), "Ada".to_string())];

        let cmd = RenderCommand::new(CommandContext::new(temp.path()), render_args);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let entry = temp
            .path()
            .join("cache/ca73b2ae18762197ad9696ab039bd2de/home.tmpl");
        assert_eq!(fs::read_to_string(entry).unwrap(), "Hello Ada");
    }

    #[test]
    fn missing_variable_fails_render() {
        let temp = project_with_template();
        let cmd = RenderCommand::new(CommandContext::new(temp.path()), args("home.tmpl"));
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, VellumError::Render { .. }));
    }
}
