use pretty_assertions::assert_eq;
use termix_core::{names, Expr};
use termix_rewrite::{match_pattern, substitute, Matcher};

fn sym(s: &str) -> Expr { Expr::symbol(s) }
fn num(v: f64) -> Expr { Expr::number(v) }
fn call(h: &str, args: Vec<Expr>) -> Expr { Expr::call(h, args) }
fn pat(name: &str) -> Expr { Expr::call(names::PATTERN, vec![sym(name)]) }

#[test]
fn repeated_capture_must_agree() {
    let p = call("g", vec![pat("x"), pat("x")]);
    let caps = match_pattern(&p, &call("g", vec![num(3.0), num(3.0)])).expect("match");
    assert_eq!(caps.get(&sym("x")), Some(&num(3.0)));
    assert!(match_pattern(&p, &call("g", vec![num(3.0), num(4.0)])).is_none());
}

#[test]
fn literals_match_exactly() {
    let p = call("f", vec![num(0.0), Expr::string("s"), sym("a")]);
    assert!(match_pattern(&p, &call("f", vec![num(0.0), Expr::string("s"), sym("a")])).is_some());
    assert!(match_pattern(&p, &call("f", vec![num(0.5), Expr::string("s"), sym("a")])).is_none());
    assert!(match_pattern(&p, &call("f", vec![num(0.0), sym("s"), sym("a")])).is_none());
}

#[test]
fn head_can_be_a_capture() {
    let p = Expr::apply(pat("h"), vec![pat("x")]);
    let caps = match_pattern(&p, &call("Sin", vec![num(1.0)])).expect("match");
    let out = substitute(&call("Pair", vec![sym("h"), sym("x")]), &caps);
    assert_eq!(out.to_string(), "Pair[Sin, 1]");
}

#[test]
fn compiled_matcher_is_reusable() {
    let m = Matcher::compile(&call("f", vec![pat("x")]));
    for v in [1.0, 2.0, 3.0] {
        let caps = m.matches(&call("f", vec![num(v)])).expect("match");
        assert_eq!(caps.len(), 1);
    }
    assert!(m.matches(&sym("f")).is_none());
}

#[test]
fn substitution_replaces_every_equal_subtree() {
    let caps = match_pattern(&call("f", vec![pat("x")]), &call("f", vec![sym("y")])).unwrap();
    let out = substitute(&call("g", vec![sym("x"), call("x", vec![])]), &caps);
    assert_eq!(out.to_string(), "g[y, y[]]");
}
