//! termix: expressions rewritten to a fixed point by user rules, with syntax
//! that grows as operators are declared.
//!
//! ```no_run
//! let mut s = termix::Session::new();
//! s.eval_str("f[0] := 1; f[~n] := n * f[n - 1]").unwrap();
//! assert_eq!(s.eval_str("f[5]").unwrap().to_string(), "120");
//! ```

pub mod error;
pub mod session;

pub use error::{format_error_with_context, Error, Result};
pub use session::Session;

pub use termix_core::{names, Expr, ExprKind, SymbolName};
pub use termix_parser::{OperatorTable, Parser, SyntaxError};
pub use termix_rewrite::{ContextStack, Matcher};
pub use termix_runtime::{Attributes, ConfigError, Evaluator, EvaluatorConfig, OpError, TraceStep};
