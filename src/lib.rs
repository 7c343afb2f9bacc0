//! plainsh - a command shell that also understands plain-English requests
//!
//! Each input line is interpreted and routed to one of several backends:
//! session built-ins, in-process file operations, system-monitor queries
//! or a host process. Lines that read like requests ("create a folder
//! called reports") are first translated into commands by an ordered
//! rule table.
//!
//! ## Module Organization
//!
//! ### Interpretation pipeline
//!
//! - [`parser`] - Tokenizing, redirection, pipelines and wildcards
//! - [`intent`] - Natural-language rule table and matcher
//! - [`dispatch`] - Backend precedence and session built-ins
//! - [`engine`] - The [`Shell`] that ties configuration and dispatch together
//!
//! ### Backends
//!
//! - [`backends`] - File operations and system monitoring
//! - [`execution`] - External processes under a timeout
//! - [`platform`] - Host facilities (signals, `/proc`, utmp, paths)
//!
//! ### Support
//!
//! - [`config`] - Configuration loading and validation
//! - [`models`] - Parsed commands, session context, dispatch results
//! - [`history`] - Append-only command history
//! - [`mod@error`] - Error types and Result aliases
//! - [`repl`] - Interactive prompt loop
//!
//! ## Quick Start
//!
//! ```no_run
//! use plainsh::Shell;
//!
//! # async fn demo() {
//! let shell = Shell::default();
//! let mut session = shell.new_session();
//!
//! let result = shell.execute("create a folder called reports", &mut session).await;
//! println!("{} (exit {})", result.output, result.exit_code);
//! # }
//! ```
//!
//! ## Concurrency
//!
//! One line is fully resolved before the next is accepted. Only external
//! commands block, and only up to the configured timeout; the child is
//! killed when the timeout expires or the line is interrupted. Sessions
//! never share mutable state.

pub mod backends;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod execution;
pub mod history;
pub mod intent;
pub mod models;
pub mod parser;
pub mod platform;
pub mod repl;

// Re-exports for core functionality
pub use config::{Config, ConfigLoader};
pub use dispatch::Dispatcher;
pub use engine::Shell;
pub use error::{Error, Result};
pub use intent::IntentMatcher;
pub use models::{DispatchResult, ParsedCommand, SessionContext};
pub use repl::Repl;

use tracing::{info, warn};

// Version information
/// The current version of plainsh from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load configuration from the default locations, falling back to defaults
///
/// A missing, unreadable or invalid configuration never prevents the shell
/// from starting; the problem is logged and defaults are used instead.
pub fn init() -> Config {
    init_with_config(None)
}

/// Like [`init`], with an explicit configuration file taking precedence
pub fn init_with_config(path: Option<&std::path::Path>) -> Config {
    info!("Initializing {} v{}", NAME, VERSION);

    match ConfigLoader::load_from(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    }
}
