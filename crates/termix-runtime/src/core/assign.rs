use crate::eval::Evaluator;
use crate::ops::OpError;
use termix_core::{names, Expr};

/// `Set`, `Delayed` and `Clear`.
pub fn register_assign(ev: &mut Evaluator) {
    ev.register(names::SET, 2, set_fn);
    ev.register(names::DELAYED, 2, delayed_fn);
    ev.register(names::CLEAR, 1, clear_fn);
}

// The value arrives evaluated: Set holds only its first argument.
fn set_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    ev.contexts_mut().set_rule(&args[0], args[1].clone())?;
    Ok(args[1].clone())
}

fn delayed_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    ev.contexts_mut().set_rule(&args[0], args[1].clone())?;
    Ok(Expr::null())
}

fn clear_fn(ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    ev.contexts_mut().clear_rule(&args[0])?;
    Ok(Expr::null())
}
