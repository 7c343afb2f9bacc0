//! Natural-language intent matching
//!
//! Translates free-text requests such as "create a folder called reports"
//! into concrete command lines using a fixed, ordered rule table. There is
//! no learning or scoring: the first rule in table order that matches and
//! whose captured values survive sanitizing decides the command.

pub mod rules;
pub mod sanitize;
pub mod suggest;

pub use rules::{IntentCategory, PlaceholderKind, RuleSpec, RULE_TABLE};
pub use sanitize::{clean_name, clean_path};

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

/// Trigger words and shapes that mark a line as a request rather than a command
const NATURAL_INDICATORS: &[&str] = &[
    r"\b(?:show|list|display|what|how|where|find|search|create|make|delete|remove)\b",
    r"\b(?:me|the|a|an|this|that|some|all)\b",
    r"\b(?:can|could|would|should|will)\b",
    r"\?$",
];

/// Shapes of a direct command: a bare word with optional arguments or flags
const COMMAND_SHAPES: &[&str] = &[r"^[a-zA-Z_-]+(\s+[^\s]+)*$", r"^[a-zA-Z_-]+\s+-[a-zA-Z]+"];

const LISTING_WORDS: &str = r"\b(?:show|list|display)\b";

const EXAMPLE_QUERIES: &[&str] = &[
    "show me the files in this directory",
    "create a new folder called projects",
    "copy file.txt to backup folder",
    "find all python files",
    "what processes are running",
    "show system memory usage",
    "go to the home directory",
    "delete the old file",
    "delete project",
    "remove folder called test",
    "delete directory named backup",
    "show me the current directory",
    "list all files including hidden ones",
    "create an empty file called readme.txt",
    "move documents to archive folder",
    "where am I?",
    "what's in the Documents folder?",
    "make a directory named test",
];

/// A compiled rule
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub category: IntentCategory,
    pub pattern: Regex,
    pub template: &'static str,
    pub kind: PlaceholderKind,
}

/// Outcome of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Command line to run
    pub command: String,
    /// Category of the rule that produced it
    pub category: IntentCategory,
    /// Position of that rule in the table
    pub rule_index: usize,
}

/// Ordered rule-table matcher
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    rules: Vec<IntentRule>,
    natural_indicators: Vec<Regex>,
    command_shapes: Vec<Regex>,
    listing_words: Option<Regex>,
    max_suggestions: usize,
}

impl IntentMatcher {
    /// Create a matcher over the built-in rule table
    pub fn new() -> Self {
        let mut matcher = Self {
            rules: Vec::with_capacity(RULE_TABLE.len()),
            natural_indicators: compile_all(NATURAL_INDICATORS),
            command_shapes: compile_all(COMMAND_SHAPES),
            listing_words: compile(LISTING_WORDS),
            max_suggestions: suggest::MAX_SUGGESTIONS,
        };

        // Pattern order matters! The table is evaluated top to bottom and
        // the first rule that produces a command wins.
        for spec in RULE_TABLE {
            matcher.add_rule(spec);
        }
        matcher
    }

    /// Limit the number of suggestions returned on a miss (at most five)
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions.min(suggest::MAX_SUGGESTIONS);
        self
    }

    fn add_rule(&mut self, spec: &RuleSpec) {
        match RegexBuilder::new(spec.pattern).case_insensitive(true).build() {
            Ok(pattern) => self.rules.push(IntentRule {
                category: spec.category,
                pattern,
                template: spec.template,
                kind: spec.kind,
            }),
            Err(e) => {
                warn!("Failed to compile intent pattern '{}': {}", spec.pattern, e);
            }
        }
    }

    /// Compiled rules in evaluation order
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Translate `query` into a command, with the rule that produced it
    pub fn resolve(&self, query: &str) -> Option<ResolvedCommand> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        for (rule_index, rule) in self.rules.iter().enumerate() {
            let Some(captures) = rule.pattern.captures(&query) else {
                continue;
            };

            let groups: Vec<Option<&str>> = captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str()))
                .collect();

            match sanitize::render(rule.template, rule.kind, &groups) {
                Some(command) => {
                    debug!(
                        "Intent '{}' resolved by {} rule #{} to '{}'",
                        query, rule.category, rule_index, command
                    );
                    return Some(ResolvedCommand {
                        command,
                        category: rule.category,
                        rule_index,
                    });
                }
                None => {
                    debug!("Rule #{} matched '{}' but sanitizing failed", rule_index, query);
                }
            }
        }

        None
    }

    /// Translate `query` into a command line
    pub fn match_query(&self, query: &str) -> Option<String> {
        self.resolve(query).map(|resolved| resolved.command)
    }

    /// Whether `query` reads as a request rather than a direct command
    ///
    /// Trigger words (or a trailing `?`) always win. Otherwise a line shaped
    /// like `word [args...]` or `word -flags` is a command, and anything else
    /// is treated as natural language.
    pub fn is_likely_natural_language(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();

        if self.natural_indicators.iter().any(|re| re.is_match(&query)) {
            return true;
        }

        let mentions_listing = self
            .listing_words
            .as_ref()
            .is_some_and(|re| re.is_match(&query));

        if self.command_shapes.iter().any(|re| re.is_match(&query)) && !mentions_listing {
            return false;
        }

        true
    }

    /// Suggestions offered when nothing matched
    pub fn suggest(&self, query: &str) -> Vec<String> {
        suggest::suggestions(query, self.max_suggestions)
    }

    /// Queries the rule table is known to handle
    pub fn example_queries() -> &'static [&'static str] {
        EXAMPLE_QUERIES
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Failed to compile regex pattern '{}': {}", pattern, e);
            None
        }
    }
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|pattern| compile(pattern)).collect()
}
