use termix_core::Expr;

/// One rewrite at a given evaluation depth.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep {
    pub depth: usize,
    pub from: Expr,
    pub to: Expr,
}

pub(crate) fn log_step(depth: usize, from: &Expr, to: &Expr) {
    log::trace!("|{} {} --> {}", " ".repeat(depth), from, to);
}
