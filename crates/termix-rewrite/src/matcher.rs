use std::rc::Rc;
use termix_core::{names, Expr, ExprKind, SymbolName};

/// Pattern variable bindings in the order they were first captured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Captures(Vec<(Expr, Expr)>);

impl Captures {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: &Expr) -> Option<&Expr> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Binds `key` on first sight; later sightings must agree with the binding.
    fn bind(&mut self, key: &Expr, value: &Expr) -> bool {
        match self.get(key) {
            Some(bound) => bound == value,
            None => { self.0.push((key.clone(), value.clone())); true }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Expr, &Expr)> { self.0.iter().map(|(k, v)| (k, v)) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// A pattern compiled into a tree that mirrors the shape it accepts.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// `Pattern[x]`: accepts anything, binding it to `x`.
    Capture(Expr),
    Number(f64),
    String(Rc<str>),
    Symbol(SymbolName),
    /// Same head and exactly as many arguments.
    Apply(Box<Matcher>, Vec<Matcher>),
}

impl Matcher {
    pub fn compile(pattern: &Expr) -> Matcher {
        match pattern.kind() {
            ExprKind::Apply(h, args) if h.as_symbol() == Some(names::PATTERN) && !args.is_empty() => {
                Matcher::Capture(args[0].clone())
            }
            ExprKind::Apply(h, args) => Matcher::Apply(Box::new(Matcher::compile(h)), args.iter().map(Matcher::compile).collect()),
            ExprKind::Number(v) => Matcher::Number(*v),
            ExprKind::String(s) => Matcher::String(s.clone()),
            ExprKind::Symbol(s) => Matcher::Symbol(*s),
        }
    }

    pub fn matches(&self, expr: &Expr) -> Option<Captures> {
        let mut caps = Captures::new();
        if self.match_into(expr, &mut caps) { Some(caps) } else { None }
    }

    fn match_into(&self, expr: &Expr, caps: &mut Captures) -> bool {
        match (self, expr.kind()) {
            (Matcher::Capture(key), _) => caps.bind(key, expr),
            (Matcher::Number(v), ExprKind::Number(n)) => v == n,
            (Matcher::String(s), ExprKind::String(t)) => s == t,
            (Matcher::Symbol(s), ExprKind::Symbol(t)) => s == t,
            (Matcher::Apply(head, args), ExprKind::Apply(h, a)) => {
                args.len() == a.len() && head.match_into(h, caps) && args.iter().zip(a).all(|(m, e)| m.match_into(e, caps))
            }
            _ => false,
        }
    }
}

pub fn match_pattern(pattern: &Expr, expr: &Expr) -> Option<Captures> { Matcher::compile(pattern).matches(expr) }

/// Replaces every subtree equal to a capture key with its binding. Untouched
/// subtrees come back as the same nodes.
pub fn substitute(template: &Expr, caps: &Captures) -> Expr {
    if caps.is_empty() { return template.clone(); }
    if let Some(bound) = caps.get(template) { return bound.clone(); }
    match template.kind() {
        ExprKind::Apply(h, args) => {
            let head = substitute(h, caps);
            let args = args.iter().map(|a| substitute(a, caps)).collect();
            template.with_parts(head, args)
        }
        _ => template.clone(),
    }
}
