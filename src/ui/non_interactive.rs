//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::{parse_bool_answer, OutputMode, UserInterface};

/// Prefix of environment variables that answer confirmations.
///
/// `VELLUM_CONFIRM_CLEAR_CACHE=yes` answers the question keyed `clear_cache`.
pub const CONFIRM_ENV_PREFIX: &str = "VELLUM_CONFIRM_";

/// UI implementation for non-interactive mode.
///
/// Confirmations resolve to an environment override when one is set and to
/// the question's default otherwise.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(CONFIRM_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn override_for(&self, key: &str) -> Option<bool> {
        let env_key = format!("{}{}", CONFIRM_ENV_PREFIX, key.to_uppercase());
        self.env_overrides
            .get(&env_key)
            .and_then(|v| parse_bool_answer(v))
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        Ok(self.override_for(key).unwrap_or(default))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
