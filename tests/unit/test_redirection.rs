//! Unit tests for redirection, pipeline and background splitting

use plainsh::parser::{detect_background, is_pipeline, split_pipeline, split_redirections};

fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod redirection_tests {
    use super::*;

    #[test]
    fn test_truncate_redirect() {
        let result = split_redirections(&tokens(&["ls", "-l", ">", "listing.txt"]));
        assert_eq!(result.cleaned_args, vec!["ls", "-l"]);
        assert_eq!(result.output_file.as_deref(), Some("listing.txt"));
        assert!(!result.append_mode);
    }

    #[test]
    fn test_append_redirect() {
        let result = split_redirections(&tokens(&["echo", "x", ">>", "log.txt"]));
        assert_eq!(result.output_file.as_deref(), Some("log.txt"));
        assert!(result.append_mode);
    }

    #[test]
    fn test_input_redirect() {
        let result = split_redirections(&tokens(&["wc", "-l", "<", "data.csv"]));
        assert_eq!(result.cleaned_args, vec!["wc", "-l"]);
        assert_eq!(result.input_file.as_deref(), Some("data.csv"));
        assert!(result.output_file.is_none());
    }

    #[test]
    fn test_attached_operators() {
        let result = split_redirections(&tokens(&["echo", "x", ">out.txt"]));
        assert_eq!(result.cleaned_args, vec!["echo", "x"]);
        assert_eq!(result.output_file.as_deref(), Some("out.txt"));
        assert!(!result.append_mode);

        let result = split_redirections(&tokens(&["echo", "x", ">>out.txt"]));
        assert_eq!(result.output_file.as_deref(), Some("out.txt"));
        assert!(result.append_mode);
    }

    #[test]
    fn test_last_redirect_wins() {
        let result = split_redirections(&tokens(&["echo", ">>", "a", ">", "b"]));
        assert_eq!(result.output_file.as_deref(), Some("b"));
        assert!(!result.append_mode);
    }

    #[test]
    fn test_dangling_operators_are_literal() {
        let result = split_redirections(&tokens(&["cat", "<"]));
        assert_eq!(result.cleaned_args, vec!["cat", "<"]);
        assert!(result.input_file.is_none());

        let result = split_redirections(&tokens(&["echo", ">>"]));
        assert_eq!(result.cleaned_args, vec!["echo", ">>"]);
        assert!(result.output_file.is_none());
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_quoted_bar_is_not_a_separator() {
        assert_eq!(
            split_pipeline("cat \"a|b\" | wc"),
            vec!["cat \"a|b\"", "wc"]
        );
        assert_eq!(split_pipeline("echo 'x | y'"), vec!["echo 'x | y'"]);
    }

    #[test]
    fn test_three_stages() {
        assert_eq!(
            split_pipeline("ps aux | grep rust | wc -l"),
            vec!["ps aux", "grep rust", "wc -l"]
        );
    }

    #[test]
    fn test_empty_stages_dropped() {
        assert_eq!(split_pipeline("ls || wc"), vec!["ls", "wc"]);
    }

    #[test]
    fn test_blank_line_is_one_stage() {
        assert_eq!(split_pipeline("  "), vec![""]);
    }

    #[test]
    fn test_is_pipeline() {
        assert!(is_pipeline("ls | sort"));
        assert!(!is_pipeline("ls"));
        assert!(!is_pipeline("grep \"a|b\" file"));
    }
}

#[cfg(test)]
mod background_tests {
    use super::*;

    #[test]
    fn test_trailing_ampersand() {
        assert_eq!(
            detect_background("make build &"),
            ("make build".to_string(), true)
        );
    }

    #[test]
    fn test_no_ampersand() {
        assert_eq!(detect_background(" ls -la "), ("ls -la".to_string(), false));
    }

    #[test]
    fn test_quoted_ampersand_is_not_background() {
        assert_eq!(
            detect_background("echo 'fish &"),
            ("echo 'fish &".to_string(), false)
        );
    }

    #[test]
    fn test_logical_and_is_not_background() {
        assert_eq!(
            detect_background("true &&"),
            ("true &&".to_string(), false)
        );
    }
}
