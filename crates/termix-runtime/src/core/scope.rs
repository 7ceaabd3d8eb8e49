use crate::eval::Evaluator;
use crate::ops::OpError;
use termix_core::{names, Expr, SymbolName};
use termix_rewrite::{compile_replacements, replace_all};

/// `Seq`, `Block` and `Module`.
pub fn register_scope(ev: &mut Evaluator) {
    ev.register(names::SEQ, 0, seq_fn);
    ev.register(names::BLOCK, 2, block_fn);
    ev.register(names::MODULE, 2, module_fn);
}

/// Evaluates `body` in order; the first abort ends the sequence.
pub(crate) fn run_seq(ev: &mut Evaluator, body: &[Expr]) -> Expr {
    let mut last = Expr::null();
    for e in body {
        last = ev.evaluate(e);
        if last.is_abort() { break; }
    }
    last
}

fn seq_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(run_seq(ev, args)) }

fn local_symbols(form: &str, spec: &Expr) -> Result<Vec<SymbolName>, OpError> {
    match spec.as_apply() {
        Some((_, items)) => Ok(items.iter().filter_map(Expr::as_symbol).collect()),
        None => Err(OpError::invalid(format!("{} requires list of local symbols", form))),
    }
}

fn block_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let locals = local_symbols("Block", &args[0])?;
    Ok(ev.with_scope(&locals, |ev| run_seq(ev, &args[1..])))
}

/// Renames each local `x` to a fresh `x$N` in the body instead of opening a
/// scope, so closures built inside keep referring to their own copy.
fn module_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let locals = local_symbols("Module", &args[0])?;
    let id = ev.fresh_id();
    let renames: Vec<(Expr, Expr)> = locals
        .iter()
        .map(|s| (Expr::symbol(*s), Expr::symbol(format!("{}${}", s, id).as_str())))
        .collect();
    let rules = compile_replacements(renames.iter().map(|(a, b)| (a, b)));
    Ok(Expr::call(names::SEQ, args[1..].iter().map(|e| replace_all(e, &rules)).collect()))
}
