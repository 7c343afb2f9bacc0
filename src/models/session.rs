//! Session Context Model
//!
//! Mutable per-session state threaded through every dispatch: the current
//! directory, the append-only history of input lines and the run flag.
//! Sessions never share this state; a host serving several sessions keeps
//! one context per session id.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::history::History;

/// State owned by one interactive session
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Session identifier
    id: Uuid,

    /// Directory relative paths resolve against
    current_directory: PathBuf,

    /// Directory before the last successful `cd`
    previous_directory: Option<PathBuf>,

    /// Every non-blank line received, oldest first
    history: History,

    /// Cleared by `exit` / `quit`
    running: bool,

    /// When the session started
    started_at: DateTime<Utc>,
}

impl SessionContext {
    /// Create a new session rooted at `current_directory`
    pub fn new(current_directory: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            current_directory: current_directory.into(),
            previous_directory: None,
            history: History::new(),
            running: true,
            started_at: Utc::now(),
        }
    }

    /// Create a session using the configured start directory
    ///
    /// Falls back to the process working directory, then the home directory.
    pub fn from_config(config: &Config) -> Self {
        let directory = config
            .shell
            .start_directory
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));
        Self::new(directory)
    }

    /// Session identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current working directory of the session
    pub fn current_directory(&self) -> &Path {
        &self.current_directory
    }

    /// Directory that was current before the last change
    pub fn previous_directory(&self) -> Option<&Path> {
        self.previous_directory.as_deref()
    }

    /// Move the session to `directory`, remembering where it was
    ///
    /// Callers are responsible for checking that `directory` exists.
    pub fn set_current_directory(&mut self, directory: PathBuf) {
        let previous = std::mem::replace(&mut self.current_directory, directory);
        self.previous_directory = Some(previous);
    }

    /// Append a line to the history
    pub fn record(&mut self, line: &str) {
        self.history.push(line);
    }

    /// Session history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the session loop should keep reading input
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the session loop to stop
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// When the session started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Get the session duration
    pub fn session_duration(&self) -> std::time::Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}
