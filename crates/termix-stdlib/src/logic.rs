use termix_core::{names, Expr, ExprKind, SymbolName};
use termix_runtime::{Evaluator, OpError};

pub fn register_logic(ev: &mut Evaluator) {
    ev.register(names::NOT, 1, not_fn);
    ev.register(names::AND, 2, and_fn);
    ev.register(names::OR, 2, or_fn);
    ev.register(names::XOR, 2, xor_fn);
    ev.register(names::EQUAL, 2, equal_fn);
    ev.register(names::NOT_EQUAL, 2, not_equal_fn);
    ev.register(names::LESS, 2, less_fn);
    ev.register(names::LESS_OR_EQUAL, 2, less_or_equal_fn);
    ev.register(names::GREATER, 2, greater_fn);
    ev.register(names::GREATER_OR_EQUAL, 2, greater_or_equal_fn);
}

fn not_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    Ok(match args[0].as_bool() {
        Some(b) => Expr::boolean(!b),
        None => Expr::call(names::NOT, args.to_vec()),
    })
}

/// Splits `args` into literal booleans, folded with `op`, and everything else.
fn partition_bools(args: &[Expr], op: fn(bool, bool) -> bool) -> (Option<bool>, Vec<Expr>) {
    let mut acc = None;
    let mut rest = Vec::new();
    for a in args {
        match a.as_bool() {
            Some(b) => acc = Some(acc.map_or(b, |x| op(x, b))),
            None => rest.push(a.clone()),
        }
    }
    (acc, rest)
}

/// `head[rest...]`, or the lone operand when only one is left.
fn residual(head: SymbolName, mut rest: Vec<Expr>) -> Expr {
    if rest.len() == 1 { return rest.remove(0); }
    Expr::call(head, rest)
}

fn and_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    Ok(match partition_bools(args, |a, b| a && b) {
        (Some(false), _) => Expr::boolean(false),
        (Some(true), rest) if rest.is_empty() => Expr::boolean(true),
        (_, rest) => residual(names::AND, rest),
    })
}

fn or_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    Ok(match partition_bools(args, |a, b| a || b) {
        (Some(true), _) => Expr::boolean(true),
        (Some(false), rest) if rest.is_empty() => Expr::boolean(false),
        (_, rest) => residual(names::OR, rest),
    })
}

fn xor_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    Ok(match partition_bools(args, |a, b| a ^ b) {
        (Some(b), rest) if rest.is_empty() => Expr::boolean(b),
        (Some(true), rest) => Expr::call(names::NOT, vec![residual(names::XOR, rest)]),
        (_, rest) => residual(names::XOR, rest),
    })
}

/// Symbols compare by name, numbers and strings by value. `None` when the
/// pair cannot be decided yet.
fn literal_eq(a: &Expr, b: &Expr) -> Option<bool> {
    match (a.kind(), b.kind()) {
        (ExprKind::Symbol(x), ExprKind::Symbol(y)) => Some(x == y),
        (ExprKind::Number(x), ExprKind::Number(y)) => Some(x == y),
        (ExprKind::String(x), ExprKind::String(y)) => Some(x == y),
        _ => None,
    }
}

fn equal_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    Ok(literal_eq(&args[0], &args[1]).map_or_else(|| Expr::call(names::EQUAL, args.to_vec()), Expr::boolean))
}

fn not_equal_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    Ok(literal_eq(&args[0], &args[1]).map_or_else(|| Expr::call(names::NOT_EQUAL, args.to_vec()), |eq| Expr::boolean(!eq)))
}

fn compare(head: SymbolName, args: &[Expr], op: fn(f64, f64) -> bool) -> Expr {
    match (args[0].as_number(), args[1].as_number()) {
        (Some(a), Some(b)) => Expr::boolean(op(a, b)),
        _ => Expr::call(head, args.to_vec()),
    }
}

fn less_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(compare(names::LESS, args, |a, b| a < b)) }
fn less_or_equal_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(compare(names::LESS_OR_EQUAL, args, |a, b| a <= b)) }
fn greater_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(compare(names::GREATER, args, |a, b| a > b)) }
fn greater_or_equal_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    Ok(compare(names::GREATER_OR_EQUAL, args, |a, b| a >= b))
}
