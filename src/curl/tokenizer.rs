//! Shell-style tokenizer for curl command lines

use crate::errors::ParseError;

/// Normalize a command before tokenizing
///
/// Line continuations (`\` followed by a newline) are dropped, then every run
/// of whitespace collapses to a single space. Collapsing also applies inside
/// quoted values.
fn normalize(cmd: &str) -> String {
    let joined = cmd.replace("\\\r\n", " ").replace("\\\n", " ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenize a curl command, honoring single and double quotes
///
/// Quotes are stripped from the resulting tokens and keep embedded spaces.
/// A backslash escapes the next character except inside single quotes.
pub fn tokenize(cmd: &str) -> Result<Vec<String>, ParseError> {
    let normalized = normalize(cmd);
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    // Tracks `''` so an explicitly empty argument still yields a token
    let mut quoted_token = false;
    let mut escape_next = false;

    for c in normalized.chars() {
        if escape_next {
            if in_double_quote && !matches!(c, '"' | '\\' | '$' | '`') {
                current.push('\\');
            }
            current.push(c);
            escape_next = false;
            continue;
        }

        match c {
            '\\' if !in_single_quote => {
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
                quoted_token = true;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
                quoted_token = true;
            }
            ' ' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() || quoted_token {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted_token = false;
            }
            _ => {
                current.push(c);
            }
        }
    }

    if in_single_quote || in_double_quote {
        return Err(ParseError::UnterminatedQuote);
    }

    if escape_next {
        current.push('\\');
    }

    if !current.is_empty() || quoted_token {
        tokens.push(current);
    }

    Ok(tokens)
}
