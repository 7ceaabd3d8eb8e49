//! Operations on the arguments of any application. `List` is only the usual
//! head; `Append[f[a], b]` gives `f[a, b]`.

use termix_core::{Expr, ExprKind};
use termix_runtime::{Evaluator, OpError};

pub fn register_list(ev: &mut Evaluator) {
    ev.register("Append", 2, append_fn);
    ev.register("Prepend", 2, prepend_fn);
    ev.register("First", 1, first_fn);
    ev.register("Rest", 1, rest_fn);
    ev.register("Last", 1, last_fn);
    ev.register("Head", 1, head_fn);
    ev.register("Length", 1, length_fn);
}

fn parts<'a>(e: &'a Expr, op: &str) -> Result<(&'a Expr, &'a [Expr]), OpError> {
    e.as_apply().ok_or_else(|| OpError::invalid(format!("{} requires list", op)))
}

fn append_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let (head, items) = args[0].as_apply().ok_or_else(|| OpError::invalid("Append requires list and item"))?;
    Ok(Expr::apply(head.clone(), items.iter().chain(&args[1..]).cloned().collect()))
}

fn prepend_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let (head, items) = args[0].as_apply().ok_or_else(|| OpError::invalid("Prepend requires list and item"))?;
    Ok(Expr::apply(head.clone(), args[1..].iter().chain(items).cloned().collect()))
}

fn first_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let (_, items) = parts(&args[0], "First")?;
    Ok(items.first().cloned().unwrap_or_else(Expr::null))
}

fn rest_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let (head, items) = parts(&args[0], "Rest")?;
    Ok(Expr::apply(head.clone(), items.iter().skip(1).cloned().collect()))
}

fn last_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let (_, items) = parts(&args[0], "Last")?;
    Ok(items.last().cloned().unwrap_or_else(Expr::null))
}

fn head_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let (head, _) = parts(&args[0], "Head")?;
    Ok(head.clone())
}

/// Argument count of an application, character count of a string.
fn length_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    match args[0].kind() {
        ExprKind::Apply(_, items) => Ok(Expr::number(items.len() as f64)),
        ExprKind::String(s) => Ok(Expr::number(s.chars().count() as f64)),
        _ => Err(OpError::invalid("Length requires list")),
    }
}
