use crate::error::{ParseResult, SyntaxError};
use crate::lexer::clashes_with_builtin;
use std::collections::HashMap;
use std::rc::Rc;
use termix_core::{names, Expr, ExprKind, SymbolName};

pub type PrefixBuilder = Rc<dyn Fn(Expr) -> Expr>;
pub type InfixBuilder = Rc<dyn Fn(Expr, Expr) -> Expr>;

#[derive(Clone)]
pub struct PrefixOp {
    pub power: i32,
    pub build: PrefixBuilder,
}

#[derive(Clone)]
pub struct InfixOp {
    pub power: i32,
    pub right_assoc: bool,
    pub build: InfixBuilder,
}

/// Operator texts with their prefix and infix forms. The same text may carry
/// both.
#[derive(Clone, Default)]
pub struct OperatorTable {
    prefix: HashMap<String, PrefixOp>,
    infix: HashMap<String, InfixOp>,
}

fn check_text(text: &str) -> ParseResult<()> {
    if text.is_empty() || clashes_with_builtin(text) { return Err(SyntaxError::InvalidOperator(text.to_string())); }
    Ok(())
}

fn binary(name: SymbolName) -> impl Fn(Expr, Expr) -> Expr { move |a, b| Expr::call(name, vec![a, b]) }

fn unary(name: SymbolName) -> impl Fn(Expr) -> Expr { move |x| Expr::call(name, vec![x]) }

fn flatten_lists(e: Expr, out: &mut Vec<Expr>) {
    if e.is_call(names::LIST) {
        for a in e.args() { flatten_lists(a.clone(), out); }
    } else {
        out.push(e);
    }
}

fn negate(x: Expr) -> Expr {
    match x.kind() {
        ExprKind::Number(v) => Expr::number(-v),
        _ => Expr::call(names::SUB, vec![Expr::number(0.0), x]),
    }
}

impl OperatorTable {
    pub fn new() -> Self { Self::default() }

    /// The operator set every parser starts from.
    pub fn with_defaults() -> Self {
        let mut t = Self::new();
        let defaults: ParseResult<()> = (|| {
            t.add_prefix("~", 0, unary(names::PATTERN))?;
            t.add_infix("~", 0, false, |a, b| {
                let mut items = Vec::new();
                flatten_lists(a, &mut items);
                flatten_lists(b, &mut items);
                Expr::list(items)
            })?;
            t.add_prefix("-", 100, negate)?;
            t.add_infix("-", 20, false, binary(names::SUB))?;
            t.add_prefix("+", 100, |x| x)?;
            t.add_infix("+", 20, false, binary(names::SUM))?;
            t.add_infix("*", 30, false, binary(names::MUL))?;
            t.add_infix("/", 30, false, binary(names::DIV))?;
            t.add_infix("%", 30, false, binary(names::MOD))?;
            t.add_infix("**", 40, true, binary(names::POWER))?;
            t.add_prefix("!", 15, unary(names::NOT))?;
            t.add_infix("||", 6, false, binary(names::OR))?;
            t.add_infix("&&", 7, false, binary(names::AND))?;
            t.add_infix("^", 8, false, binary(names::XOR))?;
            t.add_infix("==", 9, false, binary(names::EQUAL))?;
            t.add_infix("!=", 9, false, binary(names::NOT_EQUAL))?;
            t.add_infix("<", 10, false, binary(names::LESS))?;
            t.add_infix("<=", 10, false, binary(names::LESS_OR_EQUAL))?;
            t.add_infix(">", 10, false, binary(names::GREATER))?;
            t.add_infix(">=", 10, false, binary(names::GREATER_OR_EQUAL))?;
            t.add_infix("-->", -1, true, binary(names::FUNC))?;
            t.add_infix("=", -100, false, binary(names::SET))?;
            t.add_infix(":=", -100, false, binary(names::DELAYED))?;
            t.add_infix(";", -101, false, binary(names::SEQ))?;
            Ok(())
        })();
        debug_assert!(defaults.is_ok(), "default operators must register");
        t
    }

    pub fn add_prefix(&mut self, text: &str, power: i32, build: impl Fn(Expr) -> Expr + 'static) -> ParseResult<()> {
        check_text(text)?;
        self.prefix.insert(text.to_string(), PrefixOp { power, build: Rc::new(build) });
        Ok(())
    }

    pub fn add_infix(&mut self, text: &str, power: i32, right_assoc: bool, build: impl Fn(Expr, Expr) -> Expr + 'static) -> ParseResult<()> {
        check_text(text)?;
        self.infix.insert(text.to_string(), InfixOp { power, right_assoc, build: Rc::new(build) });
        Ok(())
    }

    /// Prefix operator `text` building `name[x]`.
    pub fn add_prefix_symbol(&mut self, text: &str, power: i32, name: SymbolName) -> ParseResult<()> {
        self.add_prefix(text, power, unary(name))
    }

    /// Infix operator `text` building `name[a, b]`.
    pub fn add_infix_symbol(&mut self, text: &str, power: i32, right_assoc: bool, name: SymbolName) -> ParseResult<()> {
        self.add_infix(text, power, right_assoc, binary(name))
    }

    pub fn prefix(&self, text: &str) -> Option<&PrefixOp> { self.prefix.get(text) }
    pub fn infix(&self, text: &str) -> Option<&InfixOp> { self.infix.get(text) }

    /// Every operator text, prefix or infix.
    pub fn texts(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self.prefix.keys().chain(self.infix.keys()).map(String::as_str).collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_texts_claimed_by_builtin_tokens() {
        let mut t = OperatorTable::new();
        assert_eq!(t.add_infix_symbol("and", 5, false, names::AND), Err(SyntaxError::InvalidOperator("and".into())));
        assert!(t.add_infix_symbol("", 5, false, names::AND).is_err());
        assert!(t.add_infix_symbol("&&&", 5, false, names::AND).is_ok());
    }

    #[test]
    fn defaults_share_texts_between_forms() {
        let t = OperatorTable::with_defaults();
        assert!(t.prefix("-").is_some() && t.infix("-").is_some());
        assert!(t.infix("**").map(|o| o.right_assoc).unwrap_or(false));
        assert_eq!(t.texts().iter().filter(|s| **s == "~").count(), 1);
    }
}
