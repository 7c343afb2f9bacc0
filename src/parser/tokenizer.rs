//! Shell-style tokenization
//!
//! Splits a raw line into tokens honoring single quotes, double quotes and
//! backslash escapes. Tokenization never fails: input with unbalanced
//! quoting falls back to plain whitespace splitting.

use tracing::debug;

/// Split `line` into shell-style tokens
pub fn tokenize(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    shlex::split(trimmed).unwrap_or_else(|| {
        debug!("Unbalanced quoting in {:?}, falling back to whitespace split", trimmed);
        trimmed.split_whitespace().map(ToString::to_string).collect()
    })
}

/// Whether `line` has an unterminated single or double quote
pub fn has_unbalanced_quotes(line: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in line.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), _) => {}
            (_, '\\') => escaped = true,
            (Some('"'), '"') => quote = None,
            (None, '"') | (None, '\'') => quote = Some(ch),
            _ => {}
        }
    }

    quote.is_some()
}
