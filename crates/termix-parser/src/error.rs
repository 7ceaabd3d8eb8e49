use crate::lexer::TokenKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Unrecognized input at {offset} near {near:?}")]
    Lexical { offset: usize, near: String },
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unexpected {found} while expecting {expected} at {offset}")]
    Unexpected { found: TokenKind, expected: TokenKind, offset: usize },
    #[error("Unexpected leading expression syntax {token:?} at {offset}")]
    NoPrefix { token: String, offset: usize },
    #[error("Unexpected infix expression syntax {token:?} at {offset}")]
    NoInfix { token: String, offset: usize },
    #[error("Operator {op:?} cannot be applied in {position} form at {offset}")]
    OperatorPosition { op: String, position: &'static str, offset: usize },
    #[error("Unexpected trailing {token:?} at {offset}")]
    Trailing { token: String, offset: usize },
    #[error("Invalid number literal {0:?}")]
    InvalidNumber(String),
    #[error("Invalid operator token {0:?}")]
    InvalidOperator(String),
}

impl SyntaxError {
    /// Byte offset into the source, when the error points at one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SyntaxError::Lexical { offset, .. }
            | SyntaxError::Unexpected { offset, .. }
            | SyntaxError::NoPrefix { offset, .. }
            | SyntaxError::NoInfix { offset, .. }
            | SyntaxError::OperatorPosition { offset, .. }
            | SyntaxError::Trailing { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, SyntaxError>;
