use crate::matcher::{substitute, Matcher};
use termix_core::{Expr, ExprKind};

/// A left side compiled into a matcher, paired with its right side.
pub type Replacement = (Matcher, Expr);

pub fn compile_replacements<'a>(pairs: impl IntoIterator<Item = (&'a Expr, &'a Expr)>) -> Vec<Replacement> {
    pairs.into_iter().map(|(lhs, rhs)| (Matcher::compile(lhs), rhs.clone())).collect()
}

fn try_top(e: &Expr, rules: &[Replacement]) -> Option<Expr> {
    rules.iter().find_map(|(m, rhs)| m.matches(e).map(|caps| substitute(rhs, &caps)))
}

/// Top-down: the first node (outermost first) a rule matches is replaced and
/// not descended into.
pub fn replace(e: &Expr, rules: &[Replacement]) -> Expr {
    if let Some(out) = try_top(e, rules) { return out; }
    match e.kind() {
        ExprKind::Apply(h, args) => {
            let head = replace(h, rules);
            let args = args.iter().map(|a| replace(a, rules)).collect();
            e.with_parts(head, args)
        }
        _ => e.clone(),
    }
}

/// Bottom-up: children are rewritten first, then the rebuilt node itself.
pub fn replace_all(e: &Expr, rules: &[Replacement]) -> Expr {
    let rebuilt = match e.kind() {
        ExprKind::Apply(h, args) => {
            let head = replace_all(h, rules);
            let args = args.iter().map(|a| replace_all(a, rules)).collect();
            e.with_parts(head, args)
        }
        _ => e.clone(),
    };
    try_top(&rebuilt, rules).unwrap_or(rebuilt)
}
