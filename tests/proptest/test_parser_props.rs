//! Property-based tests for tokenizing and line splitting

use plainsh::parser::{detect_background, parse_command, split_pipeline, tokenize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_tokenize_doesnt_panic(s in "\\PC*") {
        let _ = tokenize(&s);
        // Malformed quoting falls back instead of failing
    }

    #[test]
    fn test_plain_words_round_trip(words in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..8)) {
        let line = words.join(" ");
        prop_assert_eq!(tokenize(&line), words);
    }

    #[test]
    fn test_parsed_name_is_never_empty(
        name in "[a-z]{1,10}",
        args in prop::collection::vec("[a-z0-9]{1,8}", 0..5),
    ) {
        let line = format!("{} {}", name, args.join(" "));
        let cmd = parse_command(&line).unwrap();
        prop_assert!(!cmd.name.is_empty());
        prop_assert_eq!(cmd.name, name);
        prop_assert_eq!(cmd.args, args);
    }

    #[test]
    fn test_lines_without_bar_are_one_stage(s in "[^|]*") {
        prop_assert_eq!(split_pipeline(&s).len(), 1);
    }

    #[test]
    fn test_bar_inside_quotes_never_splits(
        head in "[a-z]{1,8}",
        quoted in "[a-z |]{0,12}",
    ) {
        let line = format!("{} \"{}\"", head, quoted);
        prop_assert_eq!(split_pipeline(&line), vec![line.trim().to_string()]);
    }

    #[test]
    fn test_stage_count_matches_bars(stages in prop::collection::vec("[a-z]{1,8}( [a-z]{1,8})?", 1..6)) {
        let line = stages.join(" | ");
        prop_assert_eq!(split_pipeline(&line), stages);
    }

    #[test]
    fn test_background_detection_is_stable(line in "[a-z ]{1,30}") {
        let (once, flagged) = detect_background(&format!("{} &", line));
        let (twice, flagged_again) = detect_background(&once);
        prop_assert!(flagged || line.trim().is_empty());
        prop_assert!(!flagged_again);
        prop_assert_eq!(once, twice);
    }
}
