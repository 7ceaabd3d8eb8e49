use crate::attrs::Attributes;
use crate::config::EvaluatorConfig;
use crate::ops::{NativeFn, OpError, OperationTable};
use crate::trace::{log_step, TraceStep};
use termix_core::{names, Expr, ExprKind, SymbolName};
use termix_rewrite::{substitute, ContextStack, Matcher};

/// Outcome of one reduction. `fired` is set when a user rule or a lambda
/// rewrote the node, so a rule reproducing its own input is not mistaken for
/// a normal form.
struct Step {
    expr: Expr,
    fired: bool,
}

impl Step {
    fn plain(expr: Expr) -> Self { Step { expr, fired: false } }
    fn fired(expr: Expr) -> Self { Step { expr, fired: true } }
}

pub struct Evaluator {
    contexts: ContextStack,
    ops: OperationTable,
    config: EvaluatorConfig,
    depth: usize,
    next_fresh: u64,
    pub(crate) trace_steps: Vec<TraceStep>,
}

impl Default for Evaluator {
    fn default() -> Self { Self::new() }
}

const ROOT_ATTRIBUTES: [(SymbolName, SymbolName); 17] = [
    (names::ABORT, names::HOLD_ALL),
    (names::DELAYED, names::HOLD_ALL),
    (names::SEQ, names::HOLD_ALL),
    (names::BLOCK, names::HOLD_ALL),
    (names::MODULE, names::HOLD_ALL),
    (names::HOLD, names::HOLD_ALL),
    (names::HOLD_FORM, names::HOLD_ALL),
    (names::FUNC, names::HOLD_ALL),
    (names::SET_ATTRS, names::HOLD_ALL),
    (names::GET_ATTRS, names::HOLD_ALL),
    (names::CLEAR_ATTRS, names::HOLD_ALL),
    (names::DEFINITION, names::HOLD_ALL),
    (names::CLEAR, names::HOLD_ALL),
    (names::SET, names::HOLD_FIRST),
    (names::CONCAT, names::FLAT),
    (names::REPLACE_ALL, names::HOLD_REST),
    (names::REPLACE, names::HOLD_REST),
];

impl Evaluator {
    pub fn new() -> Self { Self::with_config(EvaluatorConfig::default()) }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        let mut ev = Self {
            contexts: ContextStack::new(),
            ops: OperationTable::new(),
            config,
            depth: 0,
            next_fresh: 0,
            trace_steps: Vec::new(),
        };
        for (sym, attr) in ROOT_ATTRIBUTES {
            ev.contexts.set_attributes(sym, &[Expr::symbol(attr)]);
        }
        crate::core::register_core(&mut ev);
        ev
    }

    pub fn config(&self) -> &EvaluatorConfig { &self.config }

    pub fn register(&mut self, name: impl Into<SymbolName>, min_args: usize, f: NativeFn) { self.ops.register(name, min_args, f); }

    pub fn operations(&self) -> &OperationTable { &self.ops }

    pub fn contexts(&self) -> &ContextStack { &self.contexts }
    pub fn contexts_mut(&mut self) -> &mut ContextStack { &mut self.contexts }

    /// Runs `f` inside a new scope declaring `locals`; the scope is closed on
    /// every exit path, unwinding included.
    pub fn with_scope<R>(&mut self, locals: &[SymbolName], f: impl FnOnce(&mut Self) -> R) -> R {
        self.contexts.push(locals);
        let mut scope = ScopeGuard(self);
        f(&mut *scope)
    }

    /// Counter for generated names.
    pub fn fresh_id(&mut self) -> u64 {
        self.next_fresh += 1;
        self.next_fresh
    }

    pub fn set_tracing(&mut self, on: bool) { self.config.trace = on; }

    pub fn take_trace(&mut self) -> Vec<TraceStep> { std::mem::take(&mut self.trace_steps) }

    /// Rewrites `e` until it stops changing, is held, aborts, or a limit is hit.
    /// An abort handed in directly is still offered to user rules.
    pub fn evaluate(&mut self, e: &Expr) -> Expr {
        if e.is_held() { return e.clone(); }
        if self.depth >= self.config.recursion_limit { return Expr::abort(e, "Recursion limit hit"); }
        self.depth += 1;
        let out = self.fixed_point(e);
        self.depth -= 1;
        out
    }

    fn fixed_point(&mut self, input: &Expr) -> Expr {
        let mut expr = input.clone();
        let mut step = self.reduce(&expr);
        let mut iterations = 0usize;
        while (step.fired || step.expr != expr) && !step.expr.is_abort() && !step.expr.is_held() {
            self.record(input, &expr, &step.expr);
            expr = step.expr;
            iterations += 1;
            if iterations > self.config.iteration_limit { return Expr::abort(&expr, "Iterations limit hit"); }
            step = self.reduce(&expr);
        }
        step.expr
    }

    fn record(&mut self, input: &Expr, from: &Expr, to: &Expr) {
        if input.as_apply().is_none() { return; }
        log_step(self.depth, from, to);
        if self.config.trace {
            self.trace_steps.push(TraceStep { depth: self.depth, from: from.clone(), to: to.clone() });
        }
    }

    fn reduce(&mut self, e: &Expr) -> Step {
        match e.kind() {
            ExprKind::Number(_) | ExprKind::String(_) => Step::plain(e.clone()),
            ExprKind::Symbol(_) => match self.contexts.resolve(e) {
                Some(v) => Step::fired(v),
                None => Step::plain(e.clone()),
            },
            ExprKind::Apply(head, args) => self.reduce_apply(e, head, args),
        }
    }

    fn reduce_apply(&mut self, e: &Expr, head: &Expr, args: &[Expr]) -> Step {
        let new_head = self.evaluate(head);
        if new_head.is_abort() { return Step::plain(new_head); }
        let head_sym = new_head.as_symbol();
        let attrs = head_sym.map(|s| Attributes::of(&self.contexts, s)).unwrap_or_default();

        let mut new_args = Vec::with_capacity(args.len());
        for (i, a) in args.iter().enumerate() {
            if attrs.evaluates_arg(i) {
                let v = self.evaluate(a);
                if v.is_abort() { return Step::plain(v); }
                new_args.push(v);
            } else {
                new_args.push(a.clone());
            }
        }

        if let Some(s) = head_sym {
            if attrs.contains(Attributes::FLAT) && new_args.iter().any(|a| a.is_call(s)) {
                new_args = splice(new_args, s);
            }
        }
        if attrs.contains(Attributes::ORDERLESS) {
            new_args.sort_by_cached_key(|a| a.to_string());
        }
        let rebuilt = e.with_parts(new_head.clone(), new_args);

        if attrs.contains(Attributes::LISTABLE) && rebuilt.args().iter().any(|a| a.is_call(names::LIST)) {
            return Step::plain(thread_listable(&rebuilt));
        }
        if let Some(v) = self.contexts.resolve(&rebuilt) { return Step::fired(v); }
        if new_head.is_call(names::FUNC) { return self.apply_lambda(&rebuilt, &new_head); }
        if let Some(s) = head_sym {
            if let Some(out) = self.dispatch(&rebuilt, s) { return Step::plain(out); }
        }
        Step::plain(rebuilt)
    }

    /// `Func[params, body][args...]`
    fn apply_lambda(&mut self, call: &Expr, func: &Expr) -> Step {
        let spec = func.args();
        if spec.len() != 2 { return Step::plain(Expr::abort(call, "Func requires two arguments")); }
        let params: Vec<Expr> = match spec[0].kind() {
            ExprKind::Symbol(_) => vec![spec[0].clone()],
            ExprKind::Apply(_, ps) => ps.clone(),
            _ => return Step::plain(Expr::abort(call, "Invalid lambda argument spec")),
        };
        let pattern = Expr::call(names::FUNC, params.into_iter().map(|p| Expr::call(names::PATTERN, vec![p])).collect());
        let actual = Expr::call(names::FUNC, call.args().to_vec());
        match Matcher::compile(&pattern).matches(&actual) {
            Some(caps) => Step::fired(substitute(&spec[1], &caps)),
            None => Step::plain(Expr::abort(call, "Inconsistent lambda application")),
        }
    }

    fn dispatch(&mut self, call: &Expr, name: SymbolName) -> Option<Expr> {
        let op = self.ops.get(name)?;
        let args = call.args();
        if args.len() < op.min_args { return Some(Expr::abort(call, OpError::InsufficientArguments.to_string())); }
        Some(match (op.handler)(self, args) {
            Ok(v) => v,
            Err(err) => Expr::abort(call, err.to_string()),
        })
    }
}

struct ScopeGuard<'a>(&'a mut Evaluator);

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) { self.0.contexts.pop(); }
}

impl std::ops::Deref for ScopeGuard<'_> {
    type Target = Evaluator;
    fn deref(&self) -> &Evaluator { self.0 }
}

impl std::ops::DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Evaluator { self.0 }
}

fn splice(args: Vec<Expr>, head: SymbolName) -> Vec<Expr> {
    fn go(a: Expr, head: SymbolName, out: &mut Vec<Expr>) {
        if a.is_call(head) {
            for inner in a.args() { go(inner.clone(), head, out); }
        } else {
            out.push(a);
        }
    }
    let mut out = Vec::with_capacity(args.len());
    for a in args { go(a, head, &mut out); }
    out
}

/// `f[List[a1, a2], b]` becomes `List[f[a1, b], f[a2, b]]`. Every list argument
/// must have the same length; other arguments are repeated.
fn thread_listable(call: &Expr) -> Expr {
    let (head, args) = match call.as_apply() { Some(parts) => parts, None => return call.clone() };
    let mut len: Option<usize> = None;
    for a in args.iter().filter(|a| a.is_call(names::LIST)) {
        match len {
            None => len = Some(a.args().len()),
            Some(n) if n == a.args().len() => {}
            Some(_) => return Expr::abort(call, "Listable arguments have inconsistent lengths"),
        }
    }
    let n = len.unwrap_or(0);
    let items = (0..n)
        .map(|i| {
            let elem_args = args.iter().map(|a| if a.is_call(names::LIST) { a.args()[i].clone() } else { a.clone() }).collect();
            Expr::apply(head.clone(), elem_args)
        })
        .collect();
    Expr::list(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(s: &str) -> Expr { Expr::symbol(s) }
    fn num(v: f64) -> Expr { Expr::number(v) }

    #[test]
    fn atoms_are_normal_forms() {
        let mut ev = Evaluator::new();
        assert_eq!(ev.evaluate(&num(1.0)), num(1.0));
        assert_eq!(ev.evaluate(&sym("free")), sym("free"));
    }

    #[test]
    fn self_reproducing_rule_hits_iteration_limit() {
        let mut ev = Evaluator::new();
        let pat = Expr::call("spin", vec![Expr::call(names::PATTERN, vec![sym("x")])]);
        ev.contexts_mut().set_rule(&pat, Expr::call("spin", vec![sym("x")])).unwrap();
        let out = ev.evaluate(&Expr::call("spin", vec![num(1.0)]));
        assert_eq!(out.abort_message(), Some("Iterations limit hit"));
    }

    #[test]
    fn recursion_limit_is_an_abort() {
        let cfg = EvaluatorConfig { recursion_limit: 8, ..EvaluatorConfig::default() };
        let mut ev = Evaluator::with_config(cfg);
        let pat = Expr::call("deep", vec![Expr::call(names::PATTERN, vec![sym("x")])]);
        let body = Expr::call("wrap", vec![Expr::call("deep", vec![sym("x")])]);
        ev.contexts_mut().set_rule(&pat, body).unwrap();
        let out = ev.evaluate(&Expr::call("deep", vec![num(0.0)]));
        assert!(format!("{}", out).contains("Recursion limit hit"));
        assert_eq!(ev.depth, 0);
    }

    #[test]
    fn scope_is_closed_when_the_body_unwinds() {
        let mut ev = Evaluator::new();
        let before = ev.contexts().depth();
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            ev.with_scope(&[SymbolName::from("t")], |_| panic!("body failed"))
        }));
        assert!(caught.is_err());
        assert_eq!(ev.contexts().depth(), before);
    }

    #[test]
    fn listable_threads_over_lists() {
        let call = Expr::call("f", vec![Expr::list(vec![num(1.0), num(2.0)]), sym("b")]);
        assert_eq!(thread_listable(&call).to_string(), "List[f[1, b], f[2, b]]");
        let bad = Expr::call("f", vec![Expr::list(vec![num(1.0)]), Expr::list(vec![])]);
        assert_eq!(thread_listable(&bad).abort_message(), Some("Listable arguments have inconsistent lengths"));
    }

    #[test]
    fn tracing_records_steps() {
        let mut ev = Evaluator::new();
        ev.set_tracing(true);
        ev.contexts_mut().set_rule(&Expr::call("a", vec![]), Expr::call("b", vec![])).unwrap();
        ev.evaluate(&Expr::call("a", vec![]));
        let steps = ev.take_trace();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].to.to_string(), "b[]");
        assert!(ev.take_trace().is_empty());
    }
}
