//! Configuration management for plainsh
//!
//! Settings are grouped by the part of the shell they steer: command
//! execution and history, the natural-language layer, and the prompt.
//! Every field has a default, so a config file only needs the keys it
//! wants to change.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use loader::{ConfigFormat, ConfigLoader, LoadOptions};

/// Upper bound for `shell.command_timeout_secs`
pub const MAX_COMMAND_TIMEOUT_SECS: u64 = 3600;

/// Upper bound for `shell.history_display_limit`
pub const MAX_HISTORY_DISPLAY_LIMIT: usize = 10_000;

/// Main configuration structure for plainsh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command execution configuration
    pub shell: ShellConfig,

    /// Natural-language layer configuration
    pub intent: IntentConfig,

    /// Prompt configuration
    pub prompt: PromptConfig,
}

/// Command execution and history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Wall-clock limit for external commands
    pub command_timeout_secs: u64,

    /// How many entries the `history` built-in prints
    pub history_display_limit: usize,

    /// Directory new sessions start in (process cwd when unset)
    pub start_directory: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 30,
            history_display_limit: 50,
            start_directory: None,
        }
    }
}

impl ShellConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

/// Natural-language layer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentConfig {
    /// Whether free-text lines are translated at all
    pub enabled: bool,

    /// Suggestions offered when a request is not understood (1..=5)
    pub max_suggestions: usize,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_suggestions: 5,
        }
    }
}

/// Prompt settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Prefix the prompt with `user@host:`
    pub show_user_host: bool,

    /// Trailing prompt symbol
    pub symbol: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            show_user_host: true,
            symbol: "$".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid command timeout: {0} (must be between 1 and {MAX_COMMAND_TIMEOUT_SECS} seconds)")]
    InvalidCommandTimeout(u64),

    #[error("Invalid history display limit: {0} (must be between 1 and {MAX_HISTORY_DISPLAY_LIMIT})")]
    InvalidHistoryLimit(usize),

    #[error("Invalid suggestion count: {0} (must be between 1 and 5)")]
    InvalidMaxSuggestions(usize),

    #[error("Prompt symbol cannot be empty")]
    EmptyPromptSymbol,

    #[error("Start directory does not exist: {0}")]
    MissingStartDirectory(PathBuf),
}

impl ConfigError {
    /// Dotted name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::InvalidCommandTimeout(_) => "shell.command_timeout_secs",
            ConfigError::InvalidHistoryLimit(_) => "shell.history_display_limit",
            ConfigError::InvalidMaxSuggestions(_) => "intent.max_suggestions",
            ConfigError::EmptyPromptSymbol => "prompt.symbol",
            ConfigError::MissingStartDirectory(_) => "shell.start_directory",
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(err: ConfigError) -> Self {
        crate::error::Error::ConfigValidationFailed {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}

impl Config {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeout = self.shell.command_timeout_secs;
        if !(1..=MAX_COMMAND_TIMEOUT_SECS).contains(&timeout) {
            return Err(ConfigError::InvalidCommandTimeout(timeout));
        }

        let limit = self.shell.history_display_limit;
        if !(1..=MAX_HISTORY_DISPLAY_LIMIT).contains(&limit) {
            return Err(ConfigError::InvalidHistoryLimit(limit));
        }

        if let Some(dir) = &self.shell.start_directory {
            if !dir.is_dir() {
                return Err(ConfigError::MissingStartDirectory(dir.clone()));
            }
        }

        let suggestions = self.intent.max_suggestions;
        if !(1..=crate::intent::suggest::MAX_SUGGESTIONS).contains(&suggestions) {
            return Err(ConfigError::InvalidMaxSuggestions(suggestions));
        }

        if self.prompt.symbol.trim().is_empty() {
            return Err(ConfigError::EmptyPromptSymbol);
        }

        Ok(())
    }
}
