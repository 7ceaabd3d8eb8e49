use crate::eval::Evaluator;
use crate::ops::OpError;
use termix_core::{names, Expr};
use termix_rewrite::{compile_replacements, replace, replace_all, Replacement};

/// `Replace` and `ReplaceAll` with a list of `Entry[pattern, value]` pairs.
pub fn register_rewrite(ev: &mut Evaluator) {
    ev.register(names::REPLACE, 2, replace_fn);
    ev.register(names::REPLACE_ALL, 2, replace_all_fn);
}

fn replacements(form: &str, list: &Expr) -> Result<Vec<Replacement>, OpError> {
    let (_, entries) = list.as_apply().ok_or_else(|| OpError::invalid(format!("{} requires list of replacements", form)))?;
    Ok(compile_replacements(entries.iter().filter(|e| e.args().len() >= 2).map(|e| (&e.args()[0], &e.args()[1]))))
}

fn replace_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let rules = replacements("Replace", &args[1])?;
    Ok(replace(&args[0], &rules))
}

fn replace_all_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let rules = replacements("ReplaceAll", &args[1])?;
    Ok(replace_all(&args[0], &rules))
}
