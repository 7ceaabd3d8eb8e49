use pretty_assertions::assert_eq;
use termix_core::Expr;
use termix_parser::Parser;

fn roundtrip(e: &Expr) {
    let printed = e.to_string();
    let back = Parser::new().parse(&printed).expect("reparse rendering");
    assert_eq!(&back, e);
}

fn sym(s: &str) -> Expr { Expr::symbol(s) }
fn num(v: f64) -> Expr { Expr::number(v) }

#[test]
fn rt_atoms() {
    roundtrip(&num(42.0));
    roundtrip(&num(0.125));
    roundtrip(&num(-7.0));
    roundtrip(&sym("x_1"));
    roundtrip(&Expr::string("with \"quotes\" and \\ slashes"));
}

#[test]
fn rt_nested_calls() {
    let e = Expr::call("f", vec![
        Expr::call("g", vec![]),
        Expr::list(vec![num(1.0), Expr::string("a"), sym("b")]),
        Expr::apply(Expr::call("h", vec![num(2.0)]), vec![sym("z")]),
    ]);
    roundtrip(&e);
}

#[test]
fn rt_negative_number_heads_and_args() {
    roundtrip(&Expr::apply(num(-1.0), vec![sym("x")]));
    roundtrip(&Expr::call("f", vec![num(-2.5), Expr::apply(num(-3.0), vec![num(-4.0)])]));
}

#[test]
fn rt_parsed_source() {
    for src in ["Sum[1, Mul[2, 3]]", "Delayed[f[Pattern[x]], x]", "Abort[loop[1], \"Iterations limit hit\"]"] {
        let e = Parser::new().parse(src).expect("parse");
        assert_eq!(e.to_string(), src);
        roundtrip(&e);
    }
}
