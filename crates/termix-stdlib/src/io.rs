//! Output goes through the `log` facade at `info` level; with no logger
//! installed it is discarded.

use termix_core::Expr;
use termix_runtime::{Evaluator, OpError};

pub fn register_io(ev: &mut Evaluator) {
    ev.register("Echo", 1, echo_fn);
    ev.register("Print", 0, print_fn);
}

/// Logs its argument and passes it through.
fn echo_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    log::info!("Echo: {}", args[0]);
    Ok(args[0].clone())
}

fn print_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    for a in args { log::info!("{}", a); }
    Ok(Expr::null())
}

#[cfg(test)]
mod tests {
    use crate::test_support::eval_one;
    use pretty_assertions::assert_eq;

    #[test]
    fn echo_passes_through() {
        assert_eq!(eval_one("Echo[1 + 1]"), "2");
        assert_eq!(eval_one("Print[a, b]"), "Null");
    }
}
