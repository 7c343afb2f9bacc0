//! Unit tests for the natural-language intent matcher

use plainsh::intent::{clean_name, clean_path, IntentCategory, IntentMatcher, RULE_TABLE};

fn rule_position(pattern: &str) -> usize {
    RULE_TABLE
        .iter()
        .position(|rule| rule.pattern == pattern)
        .unwrap()
}

#[cfg(test)]
mod matching_tests {
    use super::*;

    #[test]
    fn test_common_requests() {
        let matcher = IntentMatcher::new();
        let cases = [
            ("create a new folder called projects", "mkdir projects"),
            ("make a directory named test", "mkdir test"),
            ("where am i?", "pwd"),
            ("show me the files in this directory", "ls"),
            ("what processes are running", "ps aux"),
            ("what's in the documents folder?", "ls documents"),
            ("move documents to archive folder", "mv documents \"archive folder\""),
            ("copy file.txt to backup folder", "cp file.txt \"backup folder\""),
            ("remove folder called test", "rm -r test"),
        ];

        for (query, expected) in cases {
            assert_eq!(
                matcher.match_query(query).as_deref(),
                Some(expected),
                "query: {}",
                query
            );
        }
    }

    #[test]
    fn test_matching_ignores_case() {
        let matcher = IntentMatcher::new();
        assert_eq!(matcher.match_query("WHERE AM I").as_deref(), Some("pwd"));
    }

    #[test]
    fn test_first_rule_in_table_order_wins() {
        let matcher = IntentMatcher::new();

        // Also matched by the generic remove rule further down the table
        let resolved = matcher.resolve("delete project").unwrap();
        assert_eq!(resolved.command, "rm -rf project");
        assert_eq!(resolved.category, IntentCategory::DirectoryDeletion);
        assert_eq!(
            resolved.rule_index,
            rule_position(r"^delete\s+([a-zA-Z_][a-zA-Z0-9_]*)$")
        );

        // The same folder-removal phrasing exists under file operations
        let resolved = matcher.resolve("remove folder called test").unwrap();
        assert_eq!(resolved.category, IntentCategory::DirectoryDeletion);
    }

    #[test]
    fn test_sanitizer_failure_moves_to_next_rule() {
        let matcher = IntentMatcher::new();

        // The first creation rule captures only "the", which cleans to nothing
        let resolved = matcher.resolve("create a new folder called the").unwrap();
        assert_eq!(resolved.command, "mkdir called");
        assert_eq!(
            resolved.rule_index,
            rule_position(r"new\s+(?:directory|folder)\s+(.+)")
        );
    }

    #[test]
    fn test_multi_word_names() {
        let matcher = IntentMatcher::new();
        assert_eq!(
            matcher.match_query("make a directory named my project").as_deref(),
            Some("mkdir \"my project\"")
        );
        assert_eq!(
            matcher
                .match_query("make a directory named my big project")
                .as_deref(),
            Some("mkdir my_big_project")
        );
    }

    #[test]
    fn test_unmatched_and_blank_queries() {
        let matcher = IntentMatcher::new();
        assert!(matcher.resolve("juggle the oranges").is_none());
        assert!(matcher.resolve("").is_none());
        assert!(matcher.resolve("   ").is_none());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let matcher = IntentMatcher::new();
        for query in IntentMatcher::example_queries() {
            assert_eq!(matcher.resolve(query), matcher.resolve(query));
        }
    }
}

#[cfg(test)]
mod gate_tests {
    use super::*;

    #[test]
    fn test_trigger_words_mean_natural_language() {
        let matcher = IntentMatcher::new();
        assert!(matcher.is_likely_natural_language("show files"));
        assert!(matcher.is_likely_natural_language("delete project"));
        assert!(matcher.is_likely_natural_language("could you help"));
        assert!(matcher.is_likely_natural_language("pwd?"));
    }

    #[test]
    fn test_command_shapes_are_not_natural_language() {
        let matcher = IntentMatcher::new();
        assert!(!matcher.is_likely_natural_language("ls -la"));
        assert!(!matcher.is_likely_natural_language("git status"));
        assert!(!matcher.is_likely_natural_language("cat notes.txt"));
        assert!(!matcher.is_likely_natural_language("pwd"));
    }

    #[test]
    fn test_odd_shapes_default_to_natural_language() {
        let matcher = IntentMatcher::new();
        assert!(matcher.is_likely_natural_language("./build.sh"));
        assert!(matcher.is_likely_natural_language("42"));
    }
}

#[cfg(test)]
mod suggestion_tests {
    use super::*;

    #[test]
    fn test_suggestions_by_keyword() {
        let matcher = IntentMatcher::new();
        assert_eq!(
            matcher.suggest("locate my stuff"),
            vec!["find . -name \"<pattern>\"", "find <path> -name \"<pattern>\""]
        );
    }

    #[test]
    fn test_no_keyword_no_suggestions() {
        let matcher = IntentMatcher::new();
        assert!(matcher.suggest("could you juggle").is_empty());
    }

    #[test]
    fn test_suggestions_never_exceed_five() {
        let matcher = IntentMatcher::new().with_max_suggestions(50);
        let suggestions = matcher.suggest("show me how to create and delete things");
        assert_eq!(suggestions.len(), 5);
    }
}

#[cfg(test)]
mod sanitizer_tests {
    use super::*;

    #[test]
    fn test_path_cleaning() {
        assert_eq!(clean_path("the reports"), "reports");
        assert_eq!(clean_path("  \"old logs\"  "), "\"old logs\"");
        assert_eq!(clean_path("this"), ".");
    }

    #[test]
    fn test_name_cleaning() {
        assert_eq!(clean_name("a notes").as_deref(), Some("notes"));
        assert_eq!(clean_name("that").as_deref(), None);
        assert_eq!(
            clean_name("quarterly sales report draft").as_deref(),
            Some("quarterly_sales_report_draft")
        );
    }
}
