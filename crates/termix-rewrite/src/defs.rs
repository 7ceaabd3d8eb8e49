//! Symbol definitions and the stack of contexts that scopes them.
//!
//! Each symbol owns a chain of versions. A scope that declares a symbol local
//! gets a fresh version linked to the one visible outside, so lookups inside
//! the scope see the local rules first and fall back to the outer ones.

use crate::rule::RuleSet;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;
use termix_core::{Expr, ExprKind, SymbolName};
use thiserror::Error;

pub type InfoRef = Rc<RefCell<SymbolInfo>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefError {
    #[error("Unsupported Set target")]
    UnsupportedTarget,
}

/// One version of a symbol's definitions.
#[derive(Debug)]
pub struct SymbolInfo {
    symbol: SymbolName,
    prev: Option<InfoRef>,
    rules: RuleSet,
    attrs: BTreeMap<SymbolName, Expr>,
}

impl SymbolInfo {
    pub fn new(symbol: SymbolName) -> Self { Self { symbol, prev: None, rules: RuleSet::new(), attrs: BTreeMap::new() } }

    /// A version that shadows `prev`: attributes carry over, rules start empty.
    pub fn next_version(prev: &InfoRef) -> Self {
        let p = prev.borrow();
        Self { symbol: p.symbol, prev: Some(prev.clone()), rules: RuleSet::new(), attrs: p.attrs.clone() }
    }

    pub fn symbol(&self) -> SymbolName { self.symbol }
    pub fn prev(&self) -> Option<&InfoRef> { self.prev.as_ref() }
    pub fn rules(&self) -> &RuleSet { &self.rules }
    pub fn attribute(&self, key: SymbolName) -> Option<&Expr> { self.attrs.get(&key) }
    pub fn attributes(&self) -> impl Iterator<Item = &Expr> { self.attrs.values() }
}

/// Rules and attributes of one version, as reported by `definition`.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionReport {
    pub rules: Vec<(Expr, Expr)>,
    pub attributes: Vec<Expr>,
}

#[derive(Debug, Default)]
struct SymbolContext {
    symbols: HashMap<SymbolName, InfoRef>,
    transparent: bool,
}

/// LIFO stack of contexts. Frame 0 is the root and is never popped.
#[derive(Debug)]
pub struct ContextStack {
    frames: Vec<SymbolContext>,
}

impl Default for ContextStack {
    fn default() -> Self { Self::new() }
}

impl ContextStack {
    pub fn new() -> Self { Self { frames: vec![SymbolContext::default()] } }

    pub fn depth(&self) -> usize { self.frames.len() }

    /// Opens a scope. It is transparent iff it declares locals; writes to
    /// non-local symbols pass through a transparent scope to the enclosing one.
    pub fn push(&mut self, locals: &[SymbolName]) {
        self.frames.push(SymbolContext { symbols: HashMap::new(), transparent: !locals.is_empty() });
        let top = self.frames.len() - 1;
        for name in locals { self.declare_local(top, *name); }
        log::debug!("scope {} opened with {} locals", top, locals.len());
    }

    pub fn pop(&mut self) -> bool {
        if self.frames.len() <= 1 { return false; }
        self.frames.pop();
        log::debug!("scope {} closed", self.frames.len());
        true
    }

    fn declare_local(&mut self, frame: usize, name: SymbolName) {
        if self.frames[frame].symbols.contains_key(&name) { return; }
        let info = match self.lookup_below(frame, name) {
            Some(prev) => SymbolInfo::next_version(&prev),
            None => SymbolInfo::new(name),
        };
        self.frames[frame].symbols.insert(name, Rc::new(RefCell::new(info)));
    }

    /// Nearest binding in frames strictly below `frame`.
    fn lookup_below(&self, frame: usize, name: SymbolName) -> Option<InfoRef> {
        self.frames[..frame].iter().rev().find_map(|c| c.symbols.get(&name).cloned())
    }

    pub fn lookup(&self, name: SymbolName) -> Option<InfoRef> { self.lookup_below(self.frames.len(), name) }

    /// The version writes to `name` go to, creating it when needed.
    pub fn writable(&mut self, name: SymbolName) -> InfoRef {
        let mut at = self.frames.len() - 1;
        loop {
            if let Some(info) = self.frames[at].symbols.get(&name) { return info.clone(); }
            if !self.frames[at].transparent || at == 0 { break; }
            at -= 1;
        }
        let info = match self.lookup_below(at, name) {
            Some(prev) => SymbolInfo::next_version(&prev),
            None => SymbolInfo::new(name),
        };
        let info = Rc::new(RefCell::new(info));
        self.frames[at].symbols.insert(name, info.clone());
        info
    }

    pub fn set_rule(&mut self, pattern: &Expr, value: Expr) -> Result<(), DefError> {
        let owner = pattern.head_symbol().ok_or(DefError::UnsupportedTarget)?;
        log::debug!("define {} -> {}", pattern, value);
        self.writable(owner).borrow_mut().rules.insert(pattern.clone(), value);
        Ok(())
    }

    pub fn clear_rule(&mut self, pattern: &Expr) -> Result<bool, DefError> {
        let owner = pattern.head_symbol().ok_or(DefError::UnsupportedTarget)?;
        Ok(self.writable(owner).borrow_mut().rules.remove(pattern))
    }

    /// `Name[...]` attributes are keyed by `Name`, bare symbols by themselves;
    /// anything else is ignored.
    pub fn set_attributes(&mut self, symbol: SymbolName, attrs: &[Expr]) {
        let info = self.writable(symbol);
        let mut info = info.borrow_mut();
        for a in attrs {
            if let Some(key) = attribute_key(a) { info.attrs.insert(key, a.clone()); }
        }
    }

    /// Removes the listed attributes, or all of them when `keys` is empty.
    pub fn clear_attributes(&mut self, symbol: SymbolName, keys: &[SymbolName]) {
        let info = self.writable(symbol);
        let mut info = info.borrow_mut();
        if keys.is_empty() { info.attrs.clear(); } else { for k in keys { info.attrs.remove(k); } }
    }

    pub fn attribute(&self, symbol: SymbolName, key: SymbolName) -> Option<Expr> {
        self.lookup(symbol).and_then(|i| i.borrow().attribute(key).cloned())
    }

    pub fn has_attribute(&self, symbol: SymbolName, key: SymbolName) -> bool { self.attribute(symbol, key).is_some() }

    pub fn attributes(&self, symbol: SymbolName) -> Vec<Expr> {
        self.lookup(symbol).map(|i| i.borrow().attributes().cloned().collect()).unwrap_or_default()
    }

    /// Tries the visible versions of the owning symbol newest first, each in
    /// stored rule order.
    pub fn resolve(&self, e: &Expr) -> Option<Expr> {
        let owner = e.head_symbol()?;
        let mut cur = self.lookup(owner);
        while let Some(info) = cur {
            let version = info.borrow();
            if let Some(out) = version.rules.resolve(e) { return Some(out); }
            cur = version.prev.clone();
        }
        None
    }

    /// Every visible version of `symbol`, newest first. `None` if unseen.
    pub fn definition(&self, symbol: SymbolName) -> Option<Vec<VersionReport>> {
        let mut cur = Some(self.lookup(symbol)?);
        let mut out = Vec::new();
        while let Some(info) = cur {
            let version = info.borrow();
            out.push(VersionReport {
                rules: version.rules.iter().map(|d| (d.pattern.clone(), d.value.clone())).collect(),
                attributes: version.attributes().cloned().collect(),
            });
            cur = version.prev.clone();
        }
        Some(out)
    }

    /// Visible symbols carrying attribute `key`, sorted by name.
    pub fn symbols_with_attribute(&self, key: SymbolName) -> Vec<(SymbolName, Expr)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for frame in self.frames.iter().rev() {
            for (name, info) in &frame.symbols {
                if !seen.insert(*name) { continue; }
                if let Some(a) = info.borrow().attribute(key) { out.push((*name, a.clone())); }
            }
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

fn attribute_key(a: &Expr) -> Option<SymbolName> {
    match a.kind() {
        ExprKind::Symbol(s) => Some(*s),
        ExprKind::Apply(h, _) => h.as_symbol(),
        _ => None,
    }
}
