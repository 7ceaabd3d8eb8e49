use crate::eval::Evaluator;
use std::collections::HashMap;
use termix_core::{Expr, SymbolName};
use termix_rewrite::DefError;
use thiserror::Error;

/// Failure of a primitive operation; the dispatcher turns it into an abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    #[error("Insufficient arguments number")]
    InsufficientArguments,
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Definition(#[from] DefError),
}

impl OpError {
    pub fn invalid(message: impl Into<String>) -> Self { OpError::Invalid(message.into()) }
}

pub type NativeFn = fn(&mut Evaluator, &[Expr]) -> Result<Expr, OpError>;

#[derive(Clone, Copy)]
pub struct Operation {
    pub min_args: usize,
    pub handler: NativeFn,
}

/// Primitive operations keyed by head symbol.
#[derive(Clone, Default)]
pub struct OperationTable {
    ops: HashMap<SymbolName, Operation>,
}

impl OperationTable {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, name: impl Into<SymbolName>, min_args: usize, handler: NativeFn) {
        self.ops.insert(name.into(), Operation { min_args, handler });
    }

    pub fn get(&self, name: SymbolName) -> Option<Operation> { self.ops.get(&name).copied() }

    pub fn contains(&self, name: SymbolName) -> bool { self.ops.contains_key(&name) }

    pub fn names(&self) -> Vec<SymbolName> {
        let mut out: Vec<SymbolName> = self.ops.keys().copied().collect();
        out.sort();
        out
    }
}
