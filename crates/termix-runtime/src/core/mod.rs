use crate::eval::Evaluator;

pub mod assign;
pub mod defs;
pub mod hold;
pub mod introspection;
pub mod rewrite;
pub mod scope;

/// Installs the special forms every evaluator understands.
pub(crate) fn register_core(ev: &mut Evaluator) {
    assign::register_assign(ev);
    scope::register_scope(ev);
    defs::register_defs(ev);
    hold::register_hold(ev);
    rewrite::register_rewrite(ev);
    introspection::register_introspection(ev);
}
