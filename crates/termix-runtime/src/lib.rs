//! Fixed-point evaluator for termix expressions.
//!
//! The [`Evaluator`] owns the context stack and the operation table. Special
//! forms such as `Set`, `Block` and `Replace` are installed on construction;
//! everything else (arithmetic, strings, lists) comes from an operation
//! library registered on top.

pub mod attrs;
pub mod config;
pub mod eval;
pub mod ops;
pub mod syntax;
pub mod trace;
mod core;

pub use attrs::Attributes;
pub use config::{ConfigError, EvaluatorConfig};
pub use eval::Evaluator;
pub use ops::{NativeFn, OpError, Operation, OperationTable};
pub use trace::TraceStep;
