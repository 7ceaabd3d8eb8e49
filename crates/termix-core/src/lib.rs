pub mod expr;
pub mod names;
pub mod pretty;
pub mod symbol;

pub use expr::{Expr, ExprKind};
pub use pretty::format_expr;
pub use symbol::SymbolName;
