//! `*` / `?` name patterns
//!
//! Used by `find` and for expanding operands of the file commands. Character
//! classes are not supported; `[` matches literally.

use std::path::Path;

/// Whether `pattern` contains a wildcard character
pub fn is_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Match `name` against `pattern`
pub fn matches(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    // Position of the last `*` and the name index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some('?') => {
                p += 1;
                n += 1;
            }
            Some(&c) if c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    n = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Expand a single-component pattern against the entries of `base`
///
/// Only the last path component may contain wildcards. Hidden entries are
/// matched only when the pattern itself starts with `.`. Returns the sorted
/// matches spelled the way the pattern was, or the pattern unchanged when
/// nothing matches.
pub fn expand(pattern: &str, base: &Path) -> Vec<String> {
    if !is_pattern(pattern) {
        return vec![pattern.to_string()];
    }

    let (dir_part, file_part) = match pattern.rfind('/') {
        Some(idx) => (&pattern[..=idx], &pattern[idx + 1..]),
        None => ("", pattern),
    };
    if is_pattern(dir_part) {
        return vec![pattern.to_string()];
    }

    let search_dir = if dir_part.is_empty() {
        base.to_path_buf()
    } else {
        crate::platform::resolve_path(base, dir_part)
    };

    let Ok(entries) = std::fs::read_dir(&search_dir) else {
        return vec![pattern.to_string()];
    };

    let mut found: Vec<String> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.') || file_part.starts_with('.'))
        .filter(|name| matches(file_part, name))
        .map(|name| format!("{}{}", dir_part, name))
        .collect();

    if found.is_empty() {
        return vec![pattern.to_string()];
    }
    found.sort();
    found
}
