use crate::error::Result;
use termix_core::Expr;
use termix_runtime::{Evaluator, EvaluatorConfig};

/// An evaluator with the full operation library, fed one source text at a
/// time. Each input is parsed with the operators declared so far, so a
/// `SetAttrs[.., BinaryOp[..]]` takes effect from the next input on.
pub struct Session {
    evaluator: Evaluator,
}

impl Default for Session {
    fn default() -> Self { Self::new() }
}

impl Session {
    pub fn new() -> Self { Self::with_config(EvaluatorConfig::default()) }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        let mut evaluator = Evaluator::with_config(config);
        termix_stdlib::register_all(&mut evaluator);
        Self { evaluator }
    }

    /// Session configured from a JSON object such as `{"iteration_limit": 64}`.
    pub fn from_json_config(text: &str) -> Result<Self> { Ok(Self::with_config(EvaluatorConfig::from_json(text)?)) }

    /// Parses and evaluates `src`. Evaluation failures come back as abort
    /// expressions; only syntax errors are `Err`.
    pub fn eval_str(&mut self, src: &str) -> Result<Expr> {
        let parsed = self.evaluator.parser().parse(src)?;
        log::debug!("input {}", parsed);
        Ok(self.evaluator.evaluate(&parsed))
    }

    pub fn evaluator(&self) -> &Evaluator { &self.evaluator }
    pub fn evaluator_mut(&mut self) -> &mut Evaluator { &mut self.evaluator }
}
