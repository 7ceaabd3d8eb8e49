//! Process-wide symbol interning.
//!
//! Every symbol name is stored once in an append-only table and referred to by
//! a `u32` index, so equality and hashing of names are O(1). The table lives
//! behind a lazily initialized `OnceLock` and is never cleared.

use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Interned symbol name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolName(u32);

#[derive(Default)]
struct Interner {
    ids: HashMap<&'static str, u32>,
    names: Vec<&'static str>,
}

static INTERNER: OnceLock<RwLock<Interner>> = OnceLock::new();

fn interner() -> &'static RwLock<Interner> {
    INTERNER.get_or_init(|| {
        let mut table = Interner::default();
        for (id, name) in crate::names::PRESET.iter().enumerate() {
            table.ids.insert(*name, id as u32);
            table.names.push(*name);
        }
        RwLock::new(table)
    })
}

impl SymbolName {
    pub(crate) const fn preset(id: u32) -> Self { SymbolName(id) }

    /// Interns `text`, returning the existing handle when already present.
    pub fn intern(text: &str) -> Self {
        let found = interner().read().ids.get(text).copied();
        if let Some(id) = found {
            return SymbolName(id);
        }
        let mut table = interner().write();
        // another caller may have interned it between the two locks
        if let Some(id) = table.ids.get(text) {
            return SymbolName(*id);
        }
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let id = table.names.len() as u32;
        table.names.push(leaked);
        table.ids.insert(leaked, id);
        SymbolName(id)
    }

    pub fn as_str(&self) -> &'static str {
        interner().read().names[self.0 as usize]
    }

    pub fn raw(&self) -> u32 { self.0 }
}

impl From<&str> for SymbolName {
    fn from(text: &str) -> Self { SymbolName::intern(text) }
}

impl PartialOrd for SymbolName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for SymbolName {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 { Ordering::Equal } else { self.as_str().cmp(other.as_str()) }
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl fmt::Debug for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "SymbolName({})", self.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let a = SymbolName::intern("alpha");
        let b = SymbolName::intern("alpha");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "alpha");
        assert_ne!(a, SymbolName::intern("beta"));
    }

    #[test]
    fn ordering_follows_text() {
        let z = SymbolName::intern("zz_order");
        let a = SymbolName::intern("aa_order");
        assert!(a < z);
    }
}
