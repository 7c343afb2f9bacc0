//! Placeholder value cleaning
//!
//! Captured text is normalized before it is substituted into a template:
//! filler words are dropped, whitespace is collapsed, wrapping quotes are
//! removed, and multi-word values are re-quoted (or joined) so
//! they survive tokenization as a single argument. Cleaning is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::rules::PlaceholderKind;

static FILLER_WORDS: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:the|a|an|this|that)\b\s*")
        .map_err(|e| warn!("Failed to compile filler word pattern: {}", e))
        .ok()
});

/// Strip filler words, collapse whitespace and drop wrapping quotes
///
/// Quotes are peeled until none wrap the value, so text that was quoted
/// twice comes out the same as text quoted once.
fn normalize(raw: &str) -> String {
    let mut value = raw.to_string();
    loop {
        let collapsed = {
            let stripped = match FILLER_WORDS.as_ref() {
                Some(regex) => regex.replace_all(&value, ""),
                None => value.as_str().into(),
            };
            stripped.split_whitespace().collect::<Vec<_>>().join(" ")
        };
        match strip_matching_quotes(&collapsed) {
            Some(inner) => value = inner.to_string(),
            None => return collapsed,
        }
    }
}

fn strip_matching_quotes(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        (value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote))
            .then(|| &value[1..value.len() - 1])
    })
}

fn has_quote(value: &str) -> bool {
    value.contains('"') || value.contains('\'')
}

/// Clean a path-like value (`path`, `target`, `file`)
///
/// Never fails: an empty result becomes `.`.
pub fn clean_path(raw: &str) -> String {
    let mut path = normalize(raw);

    if path.contains(' ') && !has_quote(&path) && path.split_whitespace().count() <= 3 {
        path = format!("\"{}\"", path);
    }

    if path.is_empty() {
        ".".to_string()
    } else {
        path
    }
}

/// Clean a name for a file or directory to be created or searched for
///
/// Returns `None` when nothing is left after cleaning.
pub fn clean_name(raw: &str) -> Option<String> {
    let mut name = normalize(raw);

    if name.contains(' ') {
        if name.split_whitespace().count() <= 2 {
            name = format!("\"{}\"", name);
        } else {
            name = name.replace(' ', "_");
        }
    }

    (!name.is_empty()).then_some(name)
}

/// Clean the captured groups for `kind` and substitute them into `template`
///
/// `groups[i]` is capture group `i + 1`, `None` when it did not participate.
/// Returns `None` on a sanitizer failure so matching can move on.
pub fn render(template: &str, kind: PlaceholderKind, groups: &[Option<&str>]) -> Option<String> {
    let group = |index: usize| groups.get(index).copied().flatten();

    match kind {
        PlaceholderKind::Path => {
            let path = clean_path(group(0).unwrap_or(""));
            Some(template.replace("{path}", &path))
        }
        PlaceholderKind::Name => {
            let name = clean_name(group(0)?)?;
            Some(template.replace("{name}", &name))
        }
        PlaceholderKind::SourceDest => {
            let source = clean_path(group(0)?);
            let dest = clean_path(group(1)?);
            Some(template.replace("{source}", &source).replace("{dest}", &dest))
        }
        PlaceholderKind::Target => {
            let target = clean_path(group(0).unwrap_or(""));
            Some(template.replace("{target}", &target))
        }
        PlaceholderKind::File => {
            let file = clean_path(group(0).unwrap_or(""));
            Some(template.replace("{file}", &file))
        }
        PlaceholderKind::NameAndPath => {
            let name = clean_name(group(0)?)?;
            let path = clean_path(group(1).unwrap_or(""));
            Some(template.replace("{name}", &name).replace("{path}", &path))
        }
        PlaceholderKind::None => Some(template.to_string()),
    }
}
