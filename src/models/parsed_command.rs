//! Parsed Command Model
//!
//! The structured form of a single-stage command line once quoting,
//! redirection operators and the background marker have been resolved.

use serde::{Deserialize, Serialize};

/// A tokenized, redirection-free command
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Command name (first token)
    pub name: String,

    /// Every argument after the name, in order, with redirections removed
    pub args: Vec<String>,

    /// The subset of `args` that begin with `-`
    pub options: Vec<String>,

    /// Target of `>` or `>>`
    pub output_file: Option<String>,

    /// Whether output is appended (`>>`) rather than truncated
    pub append_mode: bool,

    /// Source of `<`
    pub input_file: Option<String>,

    /// Whether the line ended with an unquoted `&`
    pub background: bool,
}

impl ParsedCommand {
    /// Create a command with arguments and no redirections
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        let options = collect_options(&args);
        Self {
            name: name.into(),
            args,
            options,
            ..Default::default()
        }
    }

    /// Arguments that are not options
    pub fn operands(&self) -> Vec<&str> {
        self.args
            .iter()
            .filter(|arg| !is_option(arg))
            .map(String::as_str)
            .collect()
    }

    /// Whether any redirection is attached
    pub fn has_redirection(&self) -> bool {
        self.output_file.is_some() || self.input_file.is_some()
    }
}

/// A token counts as an option when it starts with `-` and has more after it
pub fn is_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

pub(crate) fn collect_options(args: &[String]) -> Vec<String> {
    args.iter().filter(|arg| is_option(arg)).cloned().collect()
}
