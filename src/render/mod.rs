//! Template rendering.
//!
//! The cache only depends on the [`Renderer`] trait: turn a template path
//! and a set of [`Variables`] into text, or fail with
//! [`VellumError::Render`](crate::VellumError::Render). [`FileRenderer`]
//! is the bundled implementation for `${var}` template files.

pub mod file;
pub mod interpolation;
pub mod variables;

pub use file::FileRenderer;
pub use interpolation::{extract_variables, interpolate, parse_template, Segment};
pub use variables::{parse_assignment, Variables};

use std::path::Path;

use crate::error::Result;

/// Produces text from a template.
///
/// Rendering is synchronous and may be expensive. Failures are returned
/// once; callers decide whether to retry.
pub trait Renderer {
    /// Render `template` with `variables`.
    fn render(&self, template: &Path, variables: &Variables) -> Result<String>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, template: &Path, variables: &Variables) -> Result<String> {
        (**self).render(template, variables)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, template: &Path, variables: &Variables) -> Result<String> {
        (**self).render(template, variables)
    }
}
