use crate::expr::{Expr, ExprKind};
use std::fmt;

pub fn format_expr(e: &Expr) -> String { e.to_string() }

/// Quotes `text`, escaping backslashes and double quotes.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' { out.push('\\'); }
        out.push(c);
    }
    out.push('"');
    out
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Number(v) => write!(f, "{}", v),
            ExprKind::String(s) => f.write_str(&quote(s)),
            ExprKind::Symbol(s) => f.write_str(s.as_str()),
            ExprKind::Apply(head, args) => {
                write!(f, "{}[", head)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{}", a)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_atoms_and_applications() {
        assert_eq!(format_expr(&Expr::number(3.0)), "3");
        assert_eq!(format_expr(&Expr::number(0.5)), "0.5");
        assert_eq!(format_expr(&Expr::number(-2.0)), "-2");
        assert_eq!(format_expr(&Expr::string("hi")), "\"hi\"");
        let e = Expr::call("Sum", vec![Expr::symbol("a"), Expr::call("f", vec![])]);
        assert_eq!(format_expr(&e), "Sum[a, f[]]");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }
}
