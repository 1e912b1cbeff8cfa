//! Positional placeholder substitution
//!
//! Translations reference runtime values as `{0}`, `{1}`, ... and are filled
//! in a single left-to-right pass:
//!
//! | Input | Result |
//! |-------|--------|
//! | `{N}` with `N < args.len()` | `args[N]` |
//! | `{N}` with `N >= args.len()` | `FormatArgumentMismatch` |
//! | `{{` / `}}` | literal `{` / `}` |
//! | `{name}`, `{}`, unclosed `{` | kept as written |
//!
//! Substituted values are never re-scanned, and unused arguments are ignored.

use crate::error::{I18nError, I18nResult};
use std::collections::BTreeSet;
use std::fmt::Display;

enum Token<'a> {
    Literal(&'a str),
    Brace(char),
    Placeholder(usize),
}

/// Splits a template into literal runs, escaped braces and placeholders
fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b @ (b'{' | b'}') if bytes.get(i + 1) == Some(&b) => {
                tokens.push(Token::Literal(&template[literal_start..i]));
                tokens.push(Token::Brace(b as char));
                i += 2;
                literal_start = i;
            }
            b'{' => {
                let close = template[i + 1..].find('}').map(|offset| i + 1 + offset);
                let index = close.and_then(|close| {
                    let digits = &template[i + 1..close];
                    if !digits.is_empty() && digits.bytes().all(|d| d.is_ascii_digit()) {
                        digits.parse::<usize>().ok()
                    } else {
                        None
                    }
                });
                match (close, index) {
                    (Some(close), Some(index)) => {
                        tokens.push(Token::Literal(&template[literal_start..i]));
                        tokens.push(Token::Placeholder(index));
                        i = close + 1;
                        literal_start = i;
                    }
                    _ => i += 1,
                }
            }
            _ => i += 1,
        }
    }
    tokens.push(Token::Literal(&template[literal_start..]));
    tokens
}

/// Substitute positional placeholders with `args`
///
/// # Errors
///
/// Returns [`I18nError::FormatArgumentMismatch`] for the first placeholder
/// whose index has no argument.
pub fn format<A: Display>(template: &str, args: &[A]) -> I18nResult<String> {
    let mut out = String::with_capacity(template.len());
    for token in tokenize(template) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Brace(brace) => out.push(brace),
            Token::Placeholder(index) => {
                let arg = args.get(index).ok_or(I18nError::FormatArgumentMismatch {
                    index,
                    provided: args.len(),
                })?;
                out.push_str(&arg.to_string());
            }
        }
    }
    Ok(out)
}

/// Placeholder indices referenced by a template
pub fn placeholders(template: &str) -> BTreeSet<usize> {
    tokenize(template)
        .into_iter()
        .filter_map(|token| match token {
            Token::Placeholder(index) => Some(index),
            _ => None,
        })
        .collect()
}

/// Number of arguments a template needs: one past its highest placeholder
pub fn arity(template: &str) -> usize {
    placeholders(template).last().map_or(0, |max| max + 1)
}
