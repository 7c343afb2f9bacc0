//! Unit tests for tokenizing and command parsing

use plainsh::parser::{has_unbalanced_quotes, parse_command, tokenize};

#[cfg(test)]
mod tokenizer_tests {
    use super::*;

    #[test]
    fn test_simple_words() {
        assert_eq!(tokenize("cp a.txt b.txt"), vec!["cp", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_quoted_arguments_stay_whole() {
        assert_eq!(
            tokenize(r#"mkdir "my project" 'other one'"#),
            vec!["mkdir", "my project", "other one"]
        );
    }

    #[test]
    fn test_mixed_quotes() {
        assert_eq!(
            tokenize(r#"echo "it's here""#),
            vec!["echo", "it's here"]
        );
    }

    #[test]
    fn test_extra_whitespace_ignored() {
        assert_eq!(tokenize("  ls    -la   "), vec!["ls", "-la"]);
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("    ").is_empty());
    }

    #[test]
    fn test_unterminated_quote_falls_back_to_whitespace() {
        // Never an error: the line is split naively instead
        assert_eq!(
            tokenize("echo 'unclosed quote"),
            vec!["echo", "'unclosed", "quote"]
        );
    }

    #[test]
    fn test_unbalanced_quote_detection() {
        assert!(has_unbalanced_quotes("echo 'x"));
        assert!(has_unbalanced_quotes("echo \"x"));
        assert!(!has_unbalanced_quotes("echo 'x' \"y\""));
        assert!(!has_unbalanced_quotes(r"echo \'"));
        assert!(!has_unbalanced_quotes("echo \"it's\""));
    }
}

#[cfg(test)]
mod parse_command_tests {
    use super::*;

    #[test]
    fn test_name_args_and_options() {
        let cmd = parse_command("ls -l -a docs").unwrap();
        assert_eq!(cmd.name, "ls");
        assert_eq!(cmd.args, vec!["-l", "-a", "docs"]);
        assert_eq!(cmd.options, vec!["-l", "-a"]);
        assert_eq!(cmd.operands(), vec!["docs"]);
        assert!(!cmd.has_redirection());
    }

    #[test]
    fn test_output_and_input_are_independent() {
        let cmd = parse_command("sort < unsorted.txt >> sorted.txt").unwrap();
        assert_eq!(cmd.name, "sort");
        assert!(cmd.args.is_empty());
        assert_eq!(cmd.input_file.as_deref(), Some("unsorted.txt"));
        assert_eq!(cmd.output_file.as_deref(), Some("sorted.txt"));
        assert!(cmd.append_mode);
        assert!(cmd.has_redirection());
    }

    #[test]
    fn test_background_marker() {
        let cmd = parse_command("sleep 10 &").unwrap();
        assert_eq!(cmd.name, "sleep");
        assert_eq!(cmd.args, vec!["10"]);
        assert!(cmd.background);
    }

    #[test]
    fn test_blank_line_has_no_command() {
        assert!(parse_command("").is_none());
        assert!(parse_command(" \t ").is_none());
    }

    #[test]
    fn test_quoted_redirect_target() {
        let cmd = parse_command(r#"echo hi > "my notes.txt""#).unwrap();
        assert_eq!(cmd.output_file.as_deref(), Some("my notes.txt"));
        assert_eq!(cmd.args, vec!["hi"]);
    }
}
