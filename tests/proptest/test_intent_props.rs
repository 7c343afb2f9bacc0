//! Property-based tests for the intent matcher

use plainsh::intent::{clean_name, clean_path, IntentMatcher};
use proptest::prelude::*;

/// Words made of letters that cannot spell any trigger word
const FLAG: &str = "-[bcdfghijklmnopqrstuvxyz]{1,3}";

/// Captured text as users type it: words, filler, stray and nested quotes,
/// padding inside quotes
fn captured_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-z]{1,8}",
        prop::sample::select(vec!["the", "a", "this", "That", "\"", "'", " ", "  "])
            .prop_map(String::from),
        "[a-z]{1,5}( [a-z]{1,5}){0,3}".prop_map(|inner| format!("\" {} \"", inner)),
        "[a-z\"' ]{1,6}",
    ];
    prop::collection::vec(piece, 0..8).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn test_matcher_doesnt_panic(s in "\\PC*") {
        let matcher = IntentMatcher::new();
        let _ = matcher.resolve(&s);
        let _ = matcher.is_likely_natural_language(&s);
        prop_assert!(matcher.suggest(&s).len() <= 5);
    }

    #[test]
    fn test_commands_with_flags_are_not_natural_language(
        name in prop::sample::select(vec!["ls", "grep", "git", "cargo", "ps", "df", "echo", "cat"]),
        flags in prop::collection::vec(FLAG, 0..4),
    ) {
        let matcher = IntentMatcher::new();
        let line = format!("{} {}", name, flags.join(" "));
        prop_assert!(!matcher.is_likely_natural_language(line.trim()));
    }

    #[test]
    fn test_resolution_is_deterministic(s in "[a-z ]{0,40}") {
        let matcher = IntentMatcher::new();
        prop_assert_eq!(matcher.resolve(&s), matcher.resolve(&s));
    }

    #[test]
    fn test_clean_path_is_idempotent(raw in captured_text()) {
        let once = clean_path(&raw);
        prop_assert_eq!(clean_path(&once), once.clone());
    }

    #[test]
    fn test_clean_name_is_idempotent(raw in captured_text()) {
        if let Some(once) = clean_name(&raw) {
            prop_assert_eq!(clean_name(&once), Some(once.clone()));
        }
    }

    #[test]
    fn test_created_names_are_never_empty(name in "[a-z]{1,10}( [a-z]{1,10}){0,3}") {
        let matcher = IntentMatcher::new();
        if let Some(command) = matcher.match_query(&format!("create a new folder called {}", name)) {
            prop_assert!(command.starts_with("mkdir "));
            prop_assert!(command.len() > "mkdir ".len());
        }
    }
}
