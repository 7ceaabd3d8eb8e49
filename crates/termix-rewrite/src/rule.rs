use crate::matcher::{substitute, Matcher};
use termix_core::{names, Expr, ExprKind};

/// Specificity of a pattern. Lighter patterns are tried first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DefWeight {
    pub apply_nodes: u32,
    pub pattern_vars: u32,
}

impl DefWeight {
    pub fn of(pattern: &Expr) -> Self {
        let mut w = DefWeight::default();
        w.accumulate(pattern);
        w
    }

    fn accumulate(&mut self, e: &Expr) {
        if let ExprKind::Apply(h, args) = e.kind() {
            self.apply_nodes += 1;
            if h.as_symbol() == Some(names::PATTERN) && !args.is_empty() {
                self.pattern_vars += 1;
                return;
            }
            self.accumulate(h);
            for a in args { self.accumulate(a); }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DefEntry {
    pub pattern: Expr,
    pub matcher: Matcher,
    pub value: Expr,
    pub weight: DefWeight,
}

impl DefEntry {
    pub fn new(pattern: Expr, value: Expr) -> Self {
        let matcher = Matcher::compile(&pattern);
        let weight = DefWeight::of(&pattern);
        Self { pattern, matcher, value, weight }
    }

    pub fn apply(&self, e: &Expr) -> Option<Expr> {
        self.matcher.matches(e).map(|caps| substitute(&self.value, &caps))
    }
}

/// Rules kept in ascending weight order; equal weights keep declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet(Vec<DefEntry>);

impl RuleSet {
    pub fn new() -> Self { Self(Vec::new()) }

    /// Replaces the rule with an identical pattern in place, otherwise inserts
    /// before the first strictly heavier rule.
    pub fn insert(&mut self, pattern: Expr, value: Expr) {
        let entry = DefEntry::new(pattern, value);
        if let Some(slot) = self.0.iter_mut().find(|d| d.pattern == entry.pattern) {
            *slot = entry;
            return;
        }
        let at = self.0.partition_point(|d| d.weight <= entry.weight);
        self.0.insert(at, entry);
    }

    pub fn remove(&mut self, pattern: &Expr) -> bool {
        match self.0.iter().position(|d| &d.pattern == pattern) {
            Some(i) => { self.0.remove(i); true }
            None => false,
        }
    }

    /// First rule, in stored order, whose pattern matches `e`.
    pub fn resolve(&self, e: &Expr) -> Option<Expr> { self.0.iter().find_map(|d| d.apply(e)) }

    pub fn iter(&self) -> impl Iterator<Item = &DefEntry> { self.0.iter() }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pat(name: &str) -> Expr { Expr::call(names::PATTERN, vec![Expr::symbol(name)]) }
    fn f(args: Vec<Expr>) -> Expr { Expr::call("f", args) }

    #[test]
    fn weight_counts_applications_and_variables() {
        assert_eq!(DefWeight::of(&Expr::symbol("x")), DefWeight { apply_nodes: 0, pattern_vars: 0 });
        assert_eq!(DefWeight::of(&f(vec![Expr::number(0.0), pat("y")])), DefWeight { apply_nodes: 2, pattern_vars: 1 });
        assert_eq!(DefWeight::of(&f(vec![pat("x"), pat("y")])), DefWeight { apply_nodes: 3, pattern_vars: 2 });
    }

    #[test]
    fn identical_pattern_is_replaced_in_place() {
        let mut rs = RuleSet::new();
        rs.insert(f(vec![pat("x")]), Expr::number(1.0));
        rs.insert(f(vec![Expr::number(0.0)]), Expr::number(0.0));
        rs.insert(f(vec![pat("x")]), Expr::number(2.0));
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.resolve(&f(vec![Expr::number(7.0)])), Some(Expr::number(2.0)));
    }

    #[test]
    fn ties_keep_declaration_order() {
        let mut rs = RuleSet::new();
        rs.insert(f(vec![Expr::symbol("a")]), Expr::number(1.0));
        rs.insert(f(vec![Expr::symbol("b")]), Expr::number(2.0));
        rs.insert(Expr::call("g", vec![Expr::symbol("c")]), Expr::number(3.0));
        let order: Vec<String> = rs.iter().map(|d| d.pattern.to_string()).collect();
        assert_eq!(order, vec!["f[a]", "f[b]", "g[c]"]);
    }

    #[test]
    fn remove_drops_only_identical_pattern() {
        let mut rs = RuleSet::new();
        rs.insert(f(vec![pat("x")]), Expr::number(1.0));
        assert!(!rs.remove(&f(vec![pat("y")])));
        assert!(rs.remove(&f(vec![pat("x")])));
        assert!(rs.is_empty());
    }
}
