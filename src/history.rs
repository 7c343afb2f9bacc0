//! In-memory command history
//!
//! Every non-blank input line a session receives is recorded here, in the
//! order it arrived. The list is append-only for the lifetime of the session
//! and is never written to disk.

use std::collections::HashSet;

/// Append-only record of attempted input lines
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a line. Blank lines are ignored.
    pub fn push(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.entries.push(line.to_string());
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an identical line was recorded
    pub fn contains(&self, line: &str) -> bool {
        self.entries.iter().any(|entry| entry == line)
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// The last `limit` entries paired with their 1-based position in the full history
    pub fn recent(&self, limit: usize) -> Vec<(usize, &str)> {
        let start = self.entries.len().saturating_sub(limit);
        self.entries[start..]
            .iter()
            .enumerate()
            .map(|(offset, entry)| (start + offset + 1, entry.as_str()))
            .collect()
    }

    /// Search history with fuzzy matching
    ///
    /// Results are ordered by score, newest first among equal scores, with
    /// duplicates removed.
    pub fn search(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            let mut seen = HashSet::new();
            return self
                .entries
                .iter()
                .rev()
                .filter(|entry| seen.insert(entry.as_str()))
                .cloned()
                .collect();
        }

        let query_lower = query.to_lowercase();

        let mut results: Vec<(usize, usize, &String)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let score = fuzzy_score(&query_lower, &entry.to_lowercase());
                (score > 0).then_some((score, index, entry))
            })
            .collect();

        // Higher score first, later entries break ties
        results.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        let mut seen = HashSet::new();
        results
            .into_iter()
            .filter(|(_, _, entry)| seen.insert(entry.as_str()))
            .map(|(_, _, entry)| entry.clone())
            .collect()
    }
}

/// Simple fuzzy scoring algorithm
/// Returns a score based on how well the query matches the target
fn fuzzy_score(query: &str, target: &str) -> usize {
    let query_chars: Vec<char> = query.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    let mut query_idx = 0;
    let mut target_idx = 0;
    let mut score = 0;
    let mut consecutive = 0;

    while query_idx < query_chars.len() && target_idx < target_chars.len() {
        if query_chars[query_idx] == target_chars[target_idx] {
            score += 1 + consecutive * 5; // Bonus for consecutive matches
            consecutive += 1;
            query_idx += 1;
        } else {
            consecutive = 0;
        }
        target_idx += 1;
    }

    // Only count as a match if all query characters were found
    if query_idx == query_chars.len() {
        score
    } else {
        0
    }
}
