use termix_core::{names, Expr, SymbolName};
use termix_runtime::{Evaluator, OpError};

pub fn register_math(ev: &mut Evaluator) {
    ev.register(names::SUM, 1, sum_fn);
    ev.register(names::MUL, 2, mul_fn);
    ev.register(names::SUB, 2, sub_fn);
    ev.register(names::DIV, 2, div_fn);
    ev.register(names::MOD, 2, mod_fn);
    ev.register(names::POWER, 2, power_fn);
}

/// Folds every numeric argument into one number placed after the symbolic ones.
fn fold_commutative(head: SymbolName, args: &[Expr], op: fn(f64, f64) -> f64) -> Expr {
    let mut acc: Option<f64> = None;
    let mut rest = Vec::with_capacity(args.len());
    for a in args {
        match a.as_number() {
            Some(n) => acc = Some(acc.map_or(n, |x| op(x, n))),
            None => rest.push(a.clone()),
        }
    }
    match acc {
        None => Expr::call(head, rest),
        Some(n) if rest.is_empty() => Expr::number(n),
        Some(n) => {
            rest.push(Expr::number(n));
            Expr::call(head, rest)
        }
    }
}

/// `op[n, xs...]`: numbers after a numeric first argument fold into it.
/// With a symbolic first argument the tail collapses through the inverse,
/// `Sub[a, x, y]` becoming `Sub[a, Sum[x, y]]`.
fn fold_ordered(head: SymbolName, args: &[Expr], op: fn(f64, f64) -> f64, inverse: fn(&[Expr]) -> Expr) -> Expr {
    let Some(first) = args[0].as_number() else {
        if args.len() == 2 { return Expr::call(head, args.to_vec()); }
        return Expr::call(head, vec![args[0].clone(), inverse(&args[1..])]);
    };
    let mut acc = first;
    let mut rest = Vec::new();
    for a in &args[1..] {
        match a.as_number() {
            Some(n) => acc = op(acc, n),
            None => rest.push(a.clone()),
        }
    }
    if rest.is_empty() { return Expr::number(acc); }
    rest.insert(0, Expr::number(acc));
    Expr::call(head, rest)
}

fn sum(args: &[Expr]) -> Expr { fold_commutative(names::SUM, args, |a, b| a + b) }
fn product(args: &[Expr]) -> Expr { fold_commutative(names::MUL, args, |a, b| a * b) }

fn sum_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(sum(args)) }
fn mul_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(product(args)) }
fn sub_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(fold_ordered(names::SUB, args, |a, b| a - b, sum)) }
fn div_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> { Ok(fold_ordered(names::DIV, args, |a, b| a / b, product)) }

/// Folds the leading run of numbers; the first symbolic argument stops it.
fn mod_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let Some(mut acc) = args[0].as_number() else { return Ok(Expr::call(names::MOD, args.to_vec())) };
    let mut i = 1;
    while let Some(n) = args.get(i).and_then(Expr::as_number) {
        acc %= n;
        i += 1;
    }
    if i == args.len() { return Ok(Expr::number(acc)); }
    let mut out = vec![Expr::number(acc)];
    out.extend_from_slice(&args[i..]);
    Ok(Expr::call(names::MOD, out))
}

/// Right-associative, and only when every argument is a number.
fn power_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let nums: Option<Vec<f64>> = args.iter().map(Expr::as_number).collect();
    Ok(match nums {
        Some(ns) => Expr::number(ns.into_iter().rev().reduce(|exp, base| base.powf(exp)).unwrap_or(1.0)),
        None => Expr::call(names::POWER, args.to_vec()),
    })
}
