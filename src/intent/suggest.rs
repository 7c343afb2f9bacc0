//! Fallback suggestions for queries no rule understood

/// Keyword buckets, checked in order; every bucket whose keyword appears
/// as a substring of the query contributes its commands.
const SUGGESTION_BUCKETS: &[(&[&str], &[&str])] = &[
    (&["list", "show", "display"], &["ls", "ls -la", "pwd", "ps aux"]),
    (
        &["create", "make", "new"],
        &["mkdir <directory>", "touch <file>", "cp <source> <dest>"],
    ),
    (
        &["delete", "remove", "rm"],
        &["rm <file>", "rm -r <directory>", "rmdir <directory>"],
    ),
    (
        &["find", "search", "locate"],
        &["find . -name \"<pattern>\"", "find <path> -name \"<pattern>\""],
    ),
    (
        &["process", "running", "system"],
        &["ps aux", "top", "free -h", "df -h", "uptime"],
    ),
];

/// Most suggestions ever returned
pub const MAX_SUGGESTIONS: usize = 5;

/// Keyword-bucketed suggestions for `query`, at most `limit` (capped at five)
pub fn suggestions(query: &str, limit: usize) -> Vec<String> {
    let query = query.to_lowercase();

    SUGGESTION_BUCKETS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|keyword| query.contains(keyword)))
        .flat_map(|(_, commands)| commands.iter())
        .take(limit.min(MAX_SUGGESTIONS))
        .map(|command| command.to_string())
        .collect()
}
