pub mod error;
pub mod lexer;
pub mod ops;
pub mod parser;

pub use error::{ParseResult, SyntaxError};
pub use lexer::{tokenize, Token, TokenKind};
pub use ops::{InfixOp, OperatorTable, PrefixOp};
pub use parser::Parser;
