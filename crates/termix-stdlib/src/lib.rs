//! Operation library registered on top of the core special forms.

use termix_runtime::Evaluator;

pub mod io;
pub mod list;
pub mod logic;
pub mod math;
pub mod string;

pub fn register_all(ev: &mut Evaluator) {
    math::register_math(ev);
    logic::register_logic(ev);
    list::register_list(ev);
    string::register_string(ev);
    io::register_io(ev);
}

/// Registers only the named groups; unknown names are logged and skipped.
pub fn register_with(ev: &mut Evaluator, groups: &[&str]) {
    for g in groups {
        match *g {
            "math" => math::register_math(ev),
            "logic" => logic::register_logic(ev),
            "list" => list::register_list(ev),
            "string" => string::register_string(ev),
            "io" => io::register_io(ev),
            other => log::warn!("unknown operation group {}", other),
        }
    }
}
