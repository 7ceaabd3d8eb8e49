use pretty_assertions::assert_eq;
use termix_core::Expr;
use termix_runtime::{Evaluator, EvaluatorConfig};

fn run(ev: &mut Evaluator, src: &str) -> Expr {
    let e = ev.parser().parse(src).expect("parse");
    ev.evaluate(&e)
}

fn eval_one(src: &str) -> String { run(&mut Evaluator::new(), src).to_string() }

#[test]
fn hold_and_release() {
    assert_eq!(eval_one("f[~x] := g[x]; Hold[f[a]]"), "f[a]");
    assert_eq!(eval_one("f[~x] := g[x]; ReleaseHold[Hold[f[a]]]"), "g[a]");
    assert_eq!(eval_one("f[~x] := g[x]; HoldForm[f[a]]"), "HoldForm[f[a]]");
}

#[test]
fn lambdas() {
    assert_eq!(eval_one("Func[List[x, y], p[y, x]][1, 2]"), "p[2, 1]");
    assert_eq!(eval_one("(x --> q[x])[5]"), "q[5]");
    assert!(eval_one("Func[List[x, y], x][1]").contains("Inconsistent lambda application"));
    assert!(eval_one("Func[1, x][1]").contains("Invalid lambda argument spec"));
    assert!(eval_one("Func[x][1]").contains("Func requires two arguments"));
}

#[test]
fn flat_and_orderless() {
    assert_eq!(eval_one("SetAttrs[S, Flat, Orderless]; S[c, S[b, a]]"), "S[a, b, c]");
    let mut ev = Evaluator::new();
    run(&mut ev, "SetAttrs[S, Orderless]");
    assert_eq!(run(&mut ev, "S[b, a]"), run(&mut ev, "S[a, b]"));
}

#[test]
fn listable_threads() {
    assert_eq!(eval_one("SetAttrs[h, Listable]; h[List[1, 2], z]"), "List[h[1, z], h[2, z]]");
    assert!(eval_one("SetAttrs[h, Listable]; h[List[1, 2], List[3]]").contains("Listable arguments have inconsistent lengths"));
}

#[test]
fn aborts_propagate_unwrapped() {
    assert_eq!(eval_one("wrap[Set[a]]"), r#"Abort[Set[a], "Insufficient arguments number"]"#);
    assert_eq!(eval_one("Seq[Set[a], b = 1]"), r#"Abort[Set[a], "Insufficient arguments number"]"#);
}

#[test]
fn user_rules_handle_aborts() {
    let mut ev = Evaluator::new();
    assert_eq!(run(&mut ev, r#"Abort[x, "boom"]"#).to_string(), r#"Abort[x, "boom"]"#);
    run(&mut ev, "Abort[~e, ~m] := handled[m]");
    assert_eq!(run(&mut ev, r#"Abort[x, "boom"]"#).to_string(), r#"handled["boom"]"#);
    assert_eq!(run(&mut ev, r#"g[Abort[x, "boom"]]"#).to_string(), r#"g[handled["boom"]]"#);
}

#[test]
fn abort_payload_is_not_reevaluated() {
    let mut ev = Evaluator::new();
    run(&mut ev, "n = 0");
    let out = run(&mut ev, r#"Abort[n = n + 1, "kept"]"#);
    assert_eq!(out.to_string(), r#"Abort[Set[n, Sum[n, 1]], "kept"]"#);
    assert_eq!(run(&mut ev, "n").to_string(), "0");
}

#[test]
fn self_reproducing_rule_terminates() {
    let out = eval_one("loop[~x] := loop[x]; loop[1]");
    assert_eq!(out, r#"Abort[loop[1], "Iterations limit hit"]"#);
}

#[test]
fn fixed_point_is_stable() {
    let mut ev = Evaluator::new();
    run(&mut ev, "r[0] := done; r[~n] := r[0]");
    let once = run(&mut ev, "r[r[7]]");
    assert_eq!(once.to_string(), "done");
    assert_eq!(ev.evaluate(&once), once);
}

#[test]
fn iteration_limit_comes_from_config() {
    let cfg = EvaluatorConfig::from_json(r#"{"iteration_limit": 3}"#).unwrap();
    let mut ev = Evaluator::with_config(cfg);
    let out = run(&mut ev, "c[1] := c[2]; c[2] := c[3]; c[3] := c[4]; c[4] := c[5]; c[1]");
    assert_eq!(out.abort_message(), Some("Iterations limit hit"));
    assert_eq!(run(&mut ev, "c[3]").to_string(), "c[5]");
}

#[test]
fn operators_declared_at_run_time() {
    let mut ev = Evaluator::new();
    run(&mut ev, r#"SetAttrs[Join, BinaryOp["<>", 15]]"#);
    run(&mut ev, r#"SetAttrs[Pw, BinaryOp["^^", 40, True]]"#);
    run(&mut ev, r#"SetAttrs[Neg, UnaryOp["~~", 90]]"#);
    assert_eq!(run(&mut ev, "Hold[a <> b ^^ c ^^ d]").to_string(), "Join[a, Pw[b, Pw[c, d]]]");
    assert_eq!(run(&mut ev, "Hold[~~a]").to_string(), "Neg[a]");
}

#[test]
fn log_records_trace() {
    let mut ev = Evaluator::new();
    run(&mut ev, "f[~x] := g[x]; Log[True]; f[1]");
    let steps = ev.take_trace();
    assert!(steps.iter().any(|s| s.to.to_string() == "g[1]"));
    run(&mut ev, "Log[False]; f[2]");
    assert!(ev.take_trace().iter().all(|s| s.to.to_string() != "g[2]"));
    assert!(run(&mut ev, "Log[maybe]").is_abort());
}
