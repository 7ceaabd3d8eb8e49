use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid evaluator config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Evaluator limits and switches. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Rewrite steps allowed at one level before giving up.
    pub iteration_limit: usize,
    /// Nesting depth of `evaluate` calls.
    pub recursion_limit: usize,
    /// Record rewrite steps in the evaluator's trace buffer.
    pub trace: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self { Self { iteration_limit: 1024, recursion_limit: 256, trace: false } }
}

impl EvaluatorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> { Ok(serde_json::from_str(text)?) }
}
