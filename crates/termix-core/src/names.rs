//! Names the engine itself gives meaning to.
//!
//! They are seeded into the interning table before anything else, so each one
//! is a compile-time constant.

use crate::symbol::SymbolName;

macro_rules! preset_names {
    ($($konst:ident = $text:literal),* $(,)?) => {
        pub(crate) const PRESET: &[&str] = &[$($text),*];
        preset_names!(@consts 0u32; $($konst),*);
    };
    (@consts $n:expr; $konst:ident $(, $rest:ident)*) => {
        pub const $konst: SymbolName = SymbolName::preset($n);
        preset_names!(@consts $n + 1u32; $($rest),*);
    };
    (@consts $n:expr;) => {};
}

preset_names! {
    PATTERN = "Pattern",
    ABORT = "Abort",
    LIST = "List",
    NULL = "Null",
    TRUE = "True",
    FALSE = "False",
    FUNC = "Func",
    ENTRY = "Entry",
    SYMBOL = "Symbol",
    PATTERNS = "Patterns",
    ATTRIBUTES = "Attributes",
    LISTABLE = "Listable",
    FLAT = "Flat",
    ORDERLESS = "Orderless",
    HOLD_ALL = "HoldAll",
    HOLD_FIRST = "HoldFirst",
    HOLD_REST = "HoldRest",
    BINARY_OP = "BinaryOp",
    UNARY_OP = "UnaryOp",
    SET = "Set",
    DELAYED = "Delayed",
    CLEAR = "Clear",
    SEQ = "Seq",
    BLOCK = "Block",
    MODULE = "Module",
    SET_ATTRS = "SetAttrs",
    GET_ATTRS = "GetAttrs",
    CLEAR_ATTRS = "ClearAttrs",
    DEFINITION = "Definition",
    HOLD = "Hold",
    HOLD_FORM = "HoldForm",
    RELEASE_HOLD = "ReleaseHold",
    REPLACE = "Replace",
    REPLACE_ALL = "ReplaceAll",
    LOG = "Log",
    SUM = "Sum",
    SUB = "Sub",
    MUL = "Mul",
    DIV = "Div",
    MOD = "Mod",
    POWER = "Power",
    NOT = "Not",
    AND = "And",
    OR = "Or",
    XOR = "Xor",
    EQUAL = "Equal",
    NOT_EQUAL = "NotEqual",
    LESS = "Less",
    LESS_OR_EQUAL = "LessOrEqual",
    GREATER = "Greater",
    GREATER_OR_EQUAL = "GreaterOrEqual",
    CONCAT = "Concat",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_to_their_text() {
        assert_eq!(PATTERN.as_str(), "Pattern");
        assert_eq!(CONCAT.as_str(), "Concat");
        assert_eq!(SymbolName::intern("HoldRest"), HOLD_REST);
    }
}
