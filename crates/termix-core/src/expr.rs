use crate::names;
use crate::symbol::SymbolName;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The four shapes an expression can take.
#[derive(Clone)]
pub enum ExprKind {
    Number(f64),
    String(Rc<str>),
    Symbol(SymbolName),
    Apply(Expr, Vec<Expr>),
}

struct Node {
    kind: ExprKind,
    hold: bool,
}

/// Immutable, reference-counted expression tree.
///
/// Cloning is a pointer copy. Subtrees are shared between expressions, so
/// rewriting code can hand back an untouched node instead of rebuilding it.
#[derive(Clone)]
pub struct Expr(Rc<Node>);

impl Expr {
    fn from_kind(kind: ExprKind, hold: bool) -> Self { Expr(Rc::new(Node { kind, hold })) }

    pub fn number(value: f64) -> Self { Self::from_kind(ExprKind::Number(value), false) }

    pub fn string(text: impl AsRef<str>) -> Self { Self::from_kind(ExprKind::String(Rc::from(text.as_ref())), false) }

    pub fn symbol(name: impl Into<SymbolName>) -> Self { Self::from_kind(ExprKind::Symbol(name.into()), false) }

    pub fn apply(head: Expr, args: Vec<Expr>) -> Self { Self::from_kind(ExprKind::Apply(head, args), false) }

    /// `name[args...]`
    pub fn call(name: impl Into<SymbolName>, args: Vec<Expr>) -> Self { Self::apply(Self::symbol(name), args) }

    pub fn null() -> Self { Self::symbol(names::NULL) }

    pub fn boolean(value: bool) -> Self { Self::symbol(if value { names::TRUE } else { names::FALSE }) }

    pub fn list(items: Vec<Expr>) -> Self { Self::call(names::LIST, items) }

    pub fn kind(&self) -> &ExprKind { &self.0.kind }

    pub fn is_held(&self) -> bool { self.0.hold }

    /// True when both handles point at the same node.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool { Rc::ptr_eq(&a.0, &b.0) }

    pub fn as_number(&self) -> Option<f64> {
        match self.kind() { ExprKind::Number(v) => Some(*v), _ => None }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.kind() { ExprKind::String(s) => Some(s), _ => None }
    }

    pub fn as_symbol(&self) -> Option<SymbolName> {
        match self.kind() { ExprKind::Symbol(s) => Some(*s), _ => None }
    }

    pub fn as_apply(&self) -> Option<(&Expr, &[Expr])> {
        match self.kind() { ExprKind::Apply(h, a) => Some((h, a.as_slice())), _ => None }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_symbol()? {
            s if s == names::TRUE => Some(true),
            s if s == names::FALSE => Some(false),
            _ => None,
        }
    }

    /// Arguments of an application; empty for atoms.
    pub fn args(&self) -> &[Expr] {
        match self.kind() { ExprKind::Apply(_, a) => a, _ => &[] }
    }

    /// The symbol that owns rules for this expression: the symbol itself, or the
    /// head of an application whose head is a symbol.
    pub fn head_symbol(&self) -> Option<SymbolName> {
        match self.kind() {
            ExprKind::Symbol(s) => Some(*s),
            ExprKind::Apply(h, _) => h.as_symbol(),
            _ => None,
        }
    }

    /// `name[...]` with any number of arguments.
    pub fn is_call(&self, name: SymbolName) -> bool {
        matches!(self.kind(), ExprKind::Apply(h, _) if h.as_symbol() == Some(name))
    }

    /// Returns `self` when `head` and every argument are the very nodes it
    /// already holds, otherwise a fresh application.
    pub fn with_parts(&self, head: Expr, args: Vec<Expr>) -> Expr {
        if let ExprKind::Apply(h, a) = self.kind() {
            if Expr::ptr_eq(h, &head) && a.len() == args.len() && a.iter().zip(&args).all(|(x, y)| Expr::ptr_eq(x, y)) {
                return self.clone();
            }
        }
        Expr::apply(head, args)
    }

    /// `Abort[expr, "message"]`. An expression that already is an abort is
    /// returned as is.
    pub fn abort(expr: &Expr, message: impl AsRef<str>) -> Expr {
        if expr.is_abort() { return expr.clone(); }
        Expr::call(names::ABORT, vec![expr.clone(), Expr::string(message)])
    }

    pub fn is_abort(&self) -> bool { self.abort_message().is_some() }

    pub fn abort_message(&self) -> Option<&str> {
        match self.kind() {
            ExprKind::Apply(h, a) if h.as_symbol() == Some(names::ABORT) && a.len() == 2 => a[1].as_str(),
            _ => None,
        }
    }

    /// Copy of the tree with every application and symbol marked as held.
    pub fn hold_form(&self) -> Expr {
        match self.kind() {
            ExprKind::Apply(h, a) => Self::from_kind(ExprKind::Apply(h.hold_form(), a.iter().map(Expr::hold_form).collect()), true),
            ExprKind::Symbol(s) => Self::from_kind(ExprKind::Symbol(*s), true),
            _ => self.clone(),
        }
    }

    /// Copy of the tree with the hold mark cleared on every node.
    pub fn release_hold(&self) -> Expr {
        match self.kind() {
            ExprKind::Apply(h, a) => {
                let head = h.release_hold();
                let args: Vec<Expr> = a.iter().map(Expr::release_hold).collect();
                if self.is_held() { Expr::apply(head, args) } else { self.with_parts(head, args) }
            }
            other if self.is_held() => Self::from_kind(other.clone(), false),
            _ => self.clone(),
        }
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self { Expr::number(v) }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self { Expr::symbol(name) }
}

impl From<SymbolName> for Expr {
    fn from(name: SymbolName) -> Self { Expr::symbol(name) }
}

fn same_number(a: f64, b: f64) -> bool { a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()) }

// Equality agrees with comparing renderings; the structural walk only avoids
// building the strings in the common cases.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        if Expr::ptr_eq(self, other) { return true; }
        match (self.kind(), other.kind()) {
            (ExprKind::Symbol(a), ExprKind::Symbol(b)) => a == b,
            (ExprKind::String(a), ExprKind::String(b)) => a == b,
            (ExprKind::Number(a), ExprKind::Number(b)) => same_number(*a, *b),
            (ExprKind::Apply(h1, a1), ExprKind::Apply(h2, a2)) => {
                a1.len() == a2.len() && h1 == h2 && a1.iter().zip(a2).all(|(x, y)| x == y)
            }
            (ExprKind::Apply(..), ExprKind::Symbol(s)) | (ExprKind::Symbol(s), ExprKind::Apply(..)) => {
                s.as_str().ends_with(']') && self.to_string() == other.to_string()
            }
            (ExprKind::Apply(..), _) | (_, ExprKind::Apply(..)) => false,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for Expr {}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

/// Canonical order: the order of the renderings.
impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other { Ordering::Equal } else { self.to_string().cmp(&other.to_string()) }
    }
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) { self.to_string().hash(state) }
}

impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_held() { write!(f, "Held({})", self) } else { write!(f, "{}", self) }
    }
}
