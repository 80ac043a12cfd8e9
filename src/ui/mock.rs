//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined confirmation answers.
//!
//! # Example
//!
//! ```
//! use vellum::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response("clear_cache", true);
//!
//! ui.message("Clearing cache");
//! assert!(ui.confirm("clear_cache", "Clear?", false).unwrap());
//!
//! assert!(ui.has_message("Clearing cache"));
//! assert_eq!(ui.prompts_shown(), &["clear_cache".to_string()]);
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions. Confirmations answer from a per-key queue
/// first, then a fixed per-key response, then the question's default.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    confirm_responses: HashMap<String, bool>,
    confirm_queues: HashMap<String, VecDeque<bool>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether the mock reports itself as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Set the answer for a confirmation key.
    pub fn set_confirm_response(&mut self, key: &str, response: bool) {
        self.confirm_responses.insert(key.to_string(), response);
    }

    /// Queue answers for a key asked several times.
    pub fn queue_confirm_responses(&mut self, key: &str, responses: Vec<bool>) {
        self.confirm_queues
            .entry(key.to_string())
            .or_default()
            .extend(responses);
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get the keys of every confirmation asked.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a message containing `text` was shown.
    pub fn has_message(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.contains(text))
    }

    /// Check if a success message containing `text` was shown.
    pub fn has_success(&self, text: &str) -> bool {
        self.successes.iter().any(|m| m.contains(text))
    }

    /// Check if a warning containing `text` was shown.
    pub fn has_warning(&self, text: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(text))
    }

    /// Check if an error containing `text` was shown.
    pub fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|m| m.contains(text))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        self.prompts_shown.push(key.to_string());

        if let Some(answer) = self.confirm_queues.get_mut(key).and_then(|q| q.pop_front()) {
            return Ok(answer);
        }

        Ok(self.confirm_responses.get(key).copied().unwrap_or(default))
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
