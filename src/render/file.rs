//! Renderer for `${var}` template files on disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::interpolation::interpolate;
use super::{Renderer, Variables};
use crate::error::{Result, VellumError};

/// Reads a template file and substitutes its placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer;

impl FileRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for FileRenderer {
    fn render(&self, template: &Path, variables: &Variables) -> Result<String> {
        let source = fs::read_to_string(template).map_err(|e| VellumError::Render {
            path: template.to_path_buf(),
            message: if e.kind() == std::io::ErrorKind::NotFound {
                "template does not exist".to_string()
            } else {
                e.to_string()
            },
        })?;

        debug!(
            "Rendering {} with {} variables",
            template.display(),
            variables.len()
        );

        interpolate(&source, variables).map_err(|message| VellumError::Render {
            path: template.to_path_buf(),
            message,
        })
    }
}
