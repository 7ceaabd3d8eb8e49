use crate::eval::Evaluator;
use crate::ops::OpError;
use termix_core::{names, Expr, SymbolName};

/// `SetAttrs`, `GetAttrs` and `ClearAttrs`.
pub fn register_defs(ev: &mut Evaluator) {
    ev.register(names::SET_ATTRS, 2, set_attrs_fn);
    ev.register(names::GET_ATTRS, 1, get_attrs_fn);
    ev.register(names::CLEAR_ATTRS, 1, clear_attrs_fn);
}

pub(crate) fn target_symbol(e: &Expr) -> Result<SymbolName, OpError> {
    e.as_symbol().ok_or_else(|| OpError::invalid("Attributes could be bound only to symbols"))
}

fn set_attrs_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let sym = target_symbol(&args[0])?;
    ev.contexts_mut().set_attributes(sym, &args[1..]);
    Ok(Expr::null())
}

fn get_attrs_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let sym = target_symbol(&args[0])?;
    Ok(Expr::list(ev.contexts().attributes(sym)))
}

fn clear_attrs_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let sym = target_symbol(&args[0])?;
    let keys: Vec<SymbolName> = args[1..].iter().filter_map(Expr::head_symbol).collect();
    ev.contexts_mut().clear_attributes(sym, &keys);
    Ok(Expr::null())
}
