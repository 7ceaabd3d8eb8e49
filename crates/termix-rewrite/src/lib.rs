pub mod defs;
pub mod engine;
pub mod matcher;
pub mod rule;

pub use defs::{ContextStack, DefError, SymbolInfo, VersionReport};
pub use engine::{compile_replacements, replace, replace_all, Replacement};
pub use matcher::{match_pattern, substitute, Captures, Matcher};
pub use rule::{DefEntry, DefWeight, RuleSet};
