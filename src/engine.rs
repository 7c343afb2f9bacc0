//! Shell engine
//!
//! Owns the configuration and the dispatcher. Sessions are created by the
//! engine but owned by the caller, so one engine can serve any number of
//! independent sessions.

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::models::{DispatchResult, SessionContext};
use tracing::info;

/// Interpretation engine shared by every session of a host
pub struct Shell {
    config: Config,
    dispatcher: Dispatcher,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        let dispatcher = Dispatcher::new(&config);
        Self { config, dispatcher }
    }

    /// Engine over an already-assembled dispatcher
    pub fn with_dispatcher(config: Config, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Start a session in the configured start directory
    pub fn new_session(&self) -> SessionContext {
        let session = SessionContext::from_config(&self.config);
        info!(
            "Session {} started in {}",
            session.id(),
            session.current_directory().display()
        );
        session
    }

    /// Interpret and run one line for `session`
    pub async fn execute(&self, line: &str, session: &mut SessionContext) -> DispatchResult {
        self.dispatcher.dispatch(line, session).await
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
