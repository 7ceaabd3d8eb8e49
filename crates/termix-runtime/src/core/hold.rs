use crate::eval::Evaluator;
use crate::ops::OpError;
use termix_core::{names, Expr};

pub fn register_hold(ev: &mut Evaluator) {
    ev.register(names::HOLD, 1, hold_fn);
    ev.register(names::RELEASE_HOLD, 1, release_hold_fn);
}

fn hold_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(args[0].hold_form()) }

fn release_hold_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(args[0].release_hold()) }
