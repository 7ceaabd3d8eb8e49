use crate::error::{ParseResult, SyntaxError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Symbol,
    String,
    Whitespace,
    Comma,
    OpenBracket,
    OpenGroup,
    CloseBracket,
    CloseGroup,
    Operator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:?}", self) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

fn builtins() -> &'static [(TokenKind, Regex)] {
    static BUILTINS: OnceLock<Vec<(TokenKind, Regex)>> = OnceLock::new();
    BUILTINS.get_or_init(|| {
        [
            (TokenKind::Number, r"^[0-9]+(?:\.[0-9]+)?"),
            (TokenKind::Symbol, r"^\w+"),
            (TokenKind::String, r#"^"(?:[^"\\]|\\.)*""#),
            (TokenKind::Whitespace, r"^(?:\s+|//[^\n]*)"),
            (TokenKind::Comma, r"^,"),
            (TokenKind::OpenBracket, r"^\["),
            (TokenKind::OpenGroup, r"^\("),
            (TokenKind::CloseBracket, r"^\]"),
            (TokenKind::CloseGroup, r"^\)"),
        ]
        .into_iter()
        .filter_map(|(k, p)| Regex::new(p).ok().map(|re| (k, re)))
        .collect()
    })
}

/// True if a built-in token would claim the start of `text`.
pub fn clashes_with_builtin(text: &str) -> bool { builtins().iter().any(|(_, re)| re.is_match(text)) }

/// Splits `src` into tokens, dropping whitespace and comments. Built-in kinds
/// are tried first, then `operators` longest first.
pub fn tokenize<'a>(src: &'a str, operators: &[&str]) -> ParseResult<Vec<Token<'a>>> {
    let mut ops: Vec<&str> = operators.to_vec();
    ops.sort_by(|a, b| b.len().cmp(&a.len()));
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < src.len() {
        let rest = &src[offset..];
        let builtin = builtins().iter().find_map(|(k, re)| re.find(rest).map(|m| (*k, m.end())));
        let (kind, len) = match builtin {
            Some(hit) => hit,
            None => match ops.iter().find(|op| rest.starts_with(**op)) {
                Some(op) => (TokenKind::Operator, op.len()),
                None => {
                    let near: String = rest.chars().take(12).collect();
                    return Err(SyntaxError::Lexical { offset, near });
                }
            },
        };
        if kind != TokenKind::Whitespace {
            out.push(Token { kind, text: &rest[..len], offset });
        }
        offset += len;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str, ops: &[&str]) -> Vec<(TokenKind, String)> {
        tokenize(src, ops).unwrap().into_iter().map(|t| (t.kind, t.text.to_string())).collect()
    }

    #[test]
    fn longest_operator_wins() {
        let toks = kinds("a**b*c", &["*", "**"]);
        assert_eq!(toks[1], (TokenKind::Operator, "**".to_string()));
        assert_eq!(toks[3], (TokenKind::Operator, "*".to_string()));
    }

    #[test]
    fn comments_and_strings() {
        let toks = kinds("f[\"a\\\"b\", 1.5] // trailing", &[]);
        assert_eq!(toks.len(), 6);
        assert_eq!(toks[2], (TokenKind::String, "\"a\\\"b\"".to_string()));
        assert_eq!(toks[4], (TokenKind::Number, "1.5".to_string()));
    }

    #[test]
    fn unknown_input_reports_offset() {
        match tokenize("a $ b", &[]) {
            Err(SyntaxError::Lexical { offset, near }) => {
                assert_eq!(offset, 2);
                assert_eq!(near, "$ b");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn builtin_clash() {
        assert!(clashes_with_builtin("and"));
        assert!(clashes_with_builtin("("));
        assert!(!clashes_with_builtin("<=>"));
    }
}
