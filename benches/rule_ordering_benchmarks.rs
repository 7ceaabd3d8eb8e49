use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use termix::{names, Expr, Session};
use termix_rewrite::RuleSet;

fn pat(name: &str) -> Expr { Expr::call(names::PATTERN, vec![Expr::symbol(name)]) }

/// `f[k, ~y] -> k` for each literal `k`, plus the catch-all `f[~x, ~y]`.
fn rules(literals: usize) -> RuleSet {
    let mut set = RuleSet::new();
    set.insert(Expr::call("f", vec![pat("x"), pat("y")]), Expr::symbol("fallback"));
    for k in 0..literals {
        let n = Expr::number(k as f64);
        set.insert(Expr::call("f", vec![n.clone(), pat("y")]), n);
    }
    set
}

/// Resolution cost as the matching rule moves towards the end of the list.
fn rule_ordering_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_ordering");
    for size in [4usize, 32, 256] {
        let set = rules(size);
        let first = Expr::call("f", vec![Expr::number(0.0), Expr::symbol("z")]);
        let last = Expr::call("f", vec![Expr::symbol("z"), Expr::symbol("z")]);
        group.bench_with_input(BenchmarkId::new("first_rule", size), &first, |b, e| b.iter(|| set.resolve(black_box(e))));
        group.bench_with_input(BenchmarkId::new("catch_all", size), &last, |b, e| b.iter(|| set.resolve(black_box(e))));
    }
    group.finish();
}

fn insertion_benchmark(c: &mut Criterion) {
    c.bench_function("insert_256_rules", |b| b.iter(|| rules(black_box(256))));
}

fn evaluation_benchmark(c: &mut Criterion) {
    c.bench_function("fib_15", |b| {
        b.iter(|| {
            let mut s = Session::new();
            let _ = s.eval_str("fib[0] := 0; fib[1] := 1; fib[~n] := fib[n - 1] + fib[n - 2]");
            s.eval_str(black_box("fib[15]"))
        })
    });
}

criterion_group!(benches, rule_ordering_benchmark, insertion_benchmark, evaluation_benchmark);
criterion_main!(benches);
