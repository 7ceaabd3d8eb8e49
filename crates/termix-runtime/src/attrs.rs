use termix_core::{names, SymbolName};
use termix_rewrite::ContextStack;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Attributes: u32 {
        const LISTABLE = 0b0001;
        const FLAT     = 0b0010;
        const ORDERLESS= 0b0100;
        const HOLD_ALL = 0b1000;
        const HOLD_FIRST = 0b1_0000;
        const HOLD_REST  = 0b10_0000;
    }
}

impl Default for Attributes {
    fn default() -> Self { Attributes::empty() }
}

const FLAGS: [(SymbolName, Attributes); 6] = [
    (names::LISTABLE, Attributes::LISTABLE),
    (names::FLAT, Attributes::FLAT),
    (names::ORDERLESS, Attributes::ORDERLESS),
    (names::HOLD_ALL, Attributes::HOLD_ALL),
    (names::HOLD_FIRST, Attributes::HOLD_FIRST),
    (names::HOLD_REST, Attributes::HOLD_REST),
];

impl Attributes {
    /// Evaluation attributes of `sym` as currently visible.
    pub fn of(contexts: &ContextStack, sym: SymbolName) -> Self {
        let Some(info) = contexts.lookup(sym) else { return Attributes::empty() };
        let info = info.borrow();
        FLAGS.iter().filter(|(n, _)| info.attribute(*n).is_some()).fold(Attributes::empty(), |acc, (_, f)| acc | *f)
    }

    /// Does argument `index` get evaluated before the head is applied?
    pub fn evaluates_arg(self, index: usize) -> bool {
        if self.contains(Attributes::HOLD_ALL) { return false; }
        if self.contains(Attributes::HOLD_FIRST) { return index > 0; }
        if self.contains(Attributes::HOLD_REST) { return index == 0; }
        true
    }
}
