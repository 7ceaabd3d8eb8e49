use crate::eval::Evaluator;
use crate::ops::OpError;
use termix_core::{names, Expr};

/// `Definition` and `Log`.
pub fn register_introspection(ev: &mut Evaluator) {
    ev.register(names::DEFINITION, 1, definition_fn);
    ev.register(names::LOG, 1, log_fn);
}

/// `Symbol[s, List[Entry[Patterns[Entry[p, v]...], Attributes[...]]...]]`,
/// newest version first, held so the patterns inside are not evaluated.
fn definition_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let sym = args[0].as_symbol().ok_or_else(|| OpError::invalid("Definition requires a symbol"))?;
    let Some(versions) = ev.contexts().definition(sym) else { return Ok(Expr::abort(&args[0], "Unknown symbol")) };
    let versions = versions
        .into_iter()
        .map(|v| {
            let rules = v.rules.into_iter().map(|(p, val)| Expr::call(names::ENTRY, vec![p, val])).collect();
            Expr::call(names::ENTRY, vec![Expr::call(names::PATTERNS, rules), Expr::call(names::ATTRIBUTES, v.attributes)])
        })
        .collect();
    Ok(Expr::call(names::SYMBOL, vec![args[0].clone(), Expr::list(versions)]).hold_form())
}

fn log_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let on = args[0].as_bool().ok_or_else(|| OpError::invalid("Log requires True or False"))?;
    ev.set_tracing(on);
    Ok(Expr::null())
}
