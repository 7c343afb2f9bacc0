//! Dispatch Result Model
//!
//! The `(output, exit code)` pair every backend produces.

use serde::{Deserialize, Serialize};

use crate::error::{Error, EXIT_FAILURE};

/// Outcome of dispatching one line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Text shown to the user (may be empty)
    pub output: String,

    /// Shell exit code, `0` on success
    pub exit_code: i32,
}

impl DispatchResult {
    /// Successful result carrying `output`
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit_code: 0,
        }
    }

    /// Successful result with no output
    pub fn empty() -> Self {
        Self::default()
    }

    /// Result whose exit code is only known at runtime (a child's status)
    pub fn with_code(output: impl Into<String>, exit_code: i32) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }

    /// Failed result with an explicit exit code
    pub fn failure(output: impl Into<String>, exit_code: i32) -> Self {
        Self::with_code(output, exit_code)
    }

    /// Failed result with the generic failure code
    pub fn error(output: impl Into<String>) -> Self {
        Self::failure(output, EXIT_FAILURE)
    }

    /// Convert a backend error into its one-line message and exit code
    pub fn from_error(err: &Error) -> Self {
        Self::failure(err.to_string(), err.exit_code())
    }

    /// Whether the exit code signals success
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Prefix the output with a line of text
    pub fn prefixed(mut self, prefix: &str) -> Self {
        self.output.insert_str(0, prefix);
        self
    }
}

impl From<Error> for DispatchResult {
    fn from(err: Error) -> Self {
        Self::from_error(&err)
    }
}
