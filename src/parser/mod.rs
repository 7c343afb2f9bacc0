//! Command line parsing
//!
//! Turns a raw line into a [`ParsedCommand`]: the trailing background
//! marker is stripped, the rest is tokenized, and redirection operators are
//! pulled out of the token stream.

mod redirection;
mod tokenizer;
pub mod wildcard;

pub use redirection::{detect_background, split_pipeline, split_redirections, Redirections};
pub use tokenizer::{has_unbalanced_quotes, tokenize};

use crate::models::parsed_command::collect_options;
use crate::models::ParsedCommand;

/// Parse a single-stage command line
///
/// Returns `None` for blank input or input made only of redirections.
pub fn parse_command(line: &str) -> Option<ParsedCommand> {
    let (line, background) = detect_background(line);
    let tokens = tokenize(&line);
    let redirections = split_redirections(&tokens);

    let mut words = redirections.cleaned_args.into_iter();
    let name = words.next()?;
    let args: Vec<String> = words.collect();

    Some(ParsedCommand {
        name,
        options: collect_options(&args),
        args,
        output_file: redirections.output_file,
        append_mode: redirections.append_mode,
        input_file: redirections.input_file,
        background,
    })
}

/// Whether `line` has more than one pipeline stage
pub fn is_pipeline(line: &str) -> bool {
    split_pipeline(line).len() > 1
}
