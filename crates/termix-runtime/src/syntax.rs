//! Operators declared at run time through `BinaryOp` / `UnaryOp` attributes.

use crate::eval::Evaluator;
use termix_core::{names, Expr, SymbolName};
use termix_parser::{OperatorTable, Parser};

/// `["text", power]`, or `["text", power, True]` for a binary operator.
fn declaration(attr: &Expr, unary: bool) -> Option<(&str, i32, bool)> {
    let args = attr.args();
    let max = if unary { 2 } else { 3 };
    if args.len() < 2 || args.len() > max { return None; }
    let text = args[0].as_str()?;
    let power = args[1].as_number()?;
    if power.fract() != 0.0 { return None; }
    let right_assoc = match args.get(2) {
        Some(flag) => flag.as_bool()?,
        None => false,
    };
    Some((text, power as i32, right_assoc))
}

fn install(table: &mut OperatorTable, sym: SymbolName, attr: &Expr, unary: bool) {
    let added = match declaration(attr, unary) {
        Some((text, power, _)) if unary => table.add_prefix_symbol(text, power, sym).map_err(|e| e.to_string()),
        Some((text, power, right)) => table.add_infix_symbol(text, power, right, sym).map_err(|e| e.to_string()),
        None => Err("malformed declaration".to_string()),
    };
    if let Err(reason) = added {
        log::warn!("skipping operator {} on {}: {}", attr, sym, reason);
    }
}

impl Evaluator {
    /// Parser for the operators visible right now: the defaults plus every
    /// declaration found on symbols in scope.
    pub fn parser(&self) -> Parser {
        let mut table = OperatorTable::with_defaults();
        for (sym, attr) in self.contexts().symbols_with_attribute(names::BINARY_OP) {
            install(&mut table, sym, &attr, false);
        }
        for (sym, attr) in self.contexts().symbols_with_attribute(names::UNARY_OP) {
            install(&mut table, sym, &attr, true);
        }
        Parser::with_operators(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn declarations_extend_the_defaults() {
        let mut ev = Evaluator::new();
        let decl = Expr::call(names::BINARY_OP, vec![Expr::string("<+>"), Expr::number(25.0)]);
        ev.contexts_mut().set_attributes(SymbolName::intern("Merge"), &[decl]);
        let neg = Expr::call(names::UNARY_OP, vec![Expr::string("#"), Expr::number(50.0)]);
        ev.contexts_mut().set_attributes(SymbolName::intern("Count"), &[neg]);
        let e = ev.parser().parse("#a <+> b * c").unwrap();
        assert_eq!(e.to_string(), "Merge[Count[a], Mul[b, c]]");
    }

    #[test]
    fn malformed_declarations_are_skipped() {
        let mut ev = Evaluator::new();
        let bad = Expr::call(names::BINARY_OP, vec![Expr::string("and"), Expr::number(5.0)]);
        ev.contexts_mut().set_attributes(SymbolName::intern("Conj"), &[bad]);
        let odd = Expr::call(names::BINARY_OP, vec![Expr::number(1.0)]);
        ev.contexts_mut().set_attributes(SymbolName::intern("Odd"), &[odd]);
        let extra = Expr::call(names::UNARY_OP, vec![Expr::string("??"), Expr::number(40.0), Expr::boolean(true)]);
        ev.contexts_mut().set_attributes(SymbolName::intern("Maybe"), &[extra]);
        let p = ev.parser();
        assert!(p.operators().infix("and").is_none());
        assert!(p.operators().prefix("??").is_none());
        assert_eq!(p.parse("1 + 2").unwrap().to_string(), "Sum[1, 2]");
    }
}
