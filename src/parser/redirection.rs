//! Redirection, pipeline and background-marker handling
//!
//! Only single-stage, quote-aware splitting is supported. This is not a
//! shell grammar: there is no here-doc, fd duplication or subshell syntax.

/// Result of stripping redirection operators from a token stream
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Redirections {
    /// Tokens left once redirections are removed
    pub cleaned_args: Vec<String>,

    /// Target of `>` / `>>`
    pub output_file: Option<String>,

    /// Source of `<`
    pub input_file: Option<String>,

    /// Set by `>>`
    pub append_mode: bool,
}

/// Extract `>`, `>>` and `<` from `tokens`, left to right
///
/// `>file` and `>>file` are accepted as combined forms. An operator that is
/// the last token has nothing to consume and is kept as a literal argument.
/// Later redirections of the same kind replace earlier ones.
pub fn split_redirections(tokens: &[String]) -> Redirections {
    let mut result = Redirections::default();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        match token.as_str() {
            op @ (">" | ">>" | "<") => match iter.next() {
                Some(target) => match op {
                    "<" => result.input_file = Some(target.clone()),
                    _ => {
                        result.output_file = Some(target.clone());
                        result.append_mode = op == ">>";
                    }
                },
                None => result.cleaned_args.push(token.clone()),
            },
            combined if combined.starts_with(">>") => {
                result.output_file = Some(combined[2..].to_string());
                result.append_mode = true;
            }
            combined if combined.starts_with('>') => {
                result.output_file = Some(combined[1..].to_string());
                result.append_mode = false;
            }
            _ => result.cleaned_args.push(token.clone()),
        }
    }

    result
}

/// Split a raw line into pipeline stages on unquoted `|`
///
/// Stages are trimmed and empty stages dropped; when nothing remains the
/// trimmed line is returned as the only stage.
pub fn split_pipeline(line: &str) -> Vec<String> {
    let mut stages = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match (quote, ch) {
            (None, '"') | (None, '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (Some(open), _) if ch == open => {
                quote = None;
                current.push(ch);
            }
            (None, '|') => {
                push_stage(&mut stages, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_stage(&mut stages, &current);

    if stages.is_empty() {
        stages.push(line.trim().to_string());
    }
    stages
}

fn push_stage(stages: &mut Vec<String>, stage: &str) {
    let stage = stage.trim();
    if !stage.is_empty() {
        stages.push(stage.to_string());
    }
}

/// Strip a trailing unquoted `&` from `line`
///
/// Returns the cleaned (trimmed) line and whether the marker was present.
/// `&&` is not a background marker.
pub fn detect_background(line: &str) -> (String, bool) {
    let trimmed = line.trim();

    let Some(body) = trimmed.strip_suffix('&') else {
        return (trimmed.to_string(), false);
    };

    if body.ends_with('&') || body.ends_with('\\') || super::has_unbalanced_quotes(body) {
        return (trimmed.to_string(), false);
    }

    (body.trim_end().to_string(), true)
}
