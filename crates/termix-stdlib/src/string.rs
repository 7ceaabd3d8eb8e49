use regex::Regex;
use std::sync::OnceLock;
use termix_core::{names, Expr};
use termix_runtime::{Evaluator, OpError};

pub fn register_string(ev: &mut Evaluator) {
    ev.register(names::CONCAT, 2, concat_fn);
    ev.register("Substring", 3, substring_fn);
    ev.register("Split", 2, split_fn);
    ev.register("Match", 2, match_fn);
    ev.register("Introduce", 1, introduce_fn);
}

fn all_strings(args: &[Expr]) -> Option<Vec<&str>> { args.iter().map(Expr::as_str).collect() }

fn concat_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let parts = all_strings(args).ok_or_else(|| OpError::invalid("Concat requires list of strings"))?;
    Ok(Expr::string(parts.concat()))
}

/// `Substring[s, from, len]`, counted in characters.
fn substring_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let spec = || OpError::invalid("Substring requires string and range spec");
    let text = args[0].as_str().ok_or_else(spec)?;
    let from = args[1].as_number().ok_or_else(spec)?;
    let len = args[2].as_number().ok_or_else(spec)?;
    if from < 0.0 || len < 0.0 || from + len > text.chars().count() as f64 {
        return Err(OpError::invalid("Substring range is out of bounds"));
    }
    Ok(Expr::string(text.chars().skip(from as usize).take(len as usize).collect::<String>()))
}

/// `Split[s, sep...]` or `Split[s, List[sep...]]`; empty pieces are dropped.
fn split_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let bad = || OpError::invalid("Split requires list of strings");
    let text = args[0].as_str().ok_or_else(bad)?;
    let listed = args.len() == 2 && args[1].is_call(names::LIST);
    let seps = if listed { all_strings(args[1].args()) } else { all_strings(&args[1..]) }.ok_or_else(bad)?;
    let seps: Vec<&str> = seps.into_iter().filter(|s| !s.is_empty()).collect();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut at = 0;
    while at < text.len() {
        match seps.iter().find(|s| text[at..].starts_with(**s)) {
            Some(sep) => {
                if at > start { pieces.push(Expr::string(&text[start..at])); }
                at += sep.len();
                start = at;
            }
            None => at += text[at..].chars().next().map_or(1, char::len_utf8),
        }
    }
    if text.len() > start { pieces.push(Expr::string(&text[start..])); }
    Ok(Expr::list(pieces))
}

/// First regex match as `Entry[index, length]` in characters, or `Entry[False]`.
fn match_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let (text, pattern) = match (args[0].as_str(), args[1].as_str()) {
        (Some(t), Some(p)) => (t, p),
        _ => return Err(OpError::invalid("Match requires string and pattern")),
    };
    let re = Regex::new(pattern).map_err(|e| OpError::invalid(format!("Invalid pattern: {}", e)))?;
    Ok(match re.find(text) {
        Some(m) => {
            let index = text[..m.start()].chars().count();
            let length = m.as_str().chars().count();
            Expr::call(names::ENTRY, vec![Expr::number(index as f64), Expr::number(length as f64)])
        }
        None => Expr::call(names::ENTRY, vec![Expr::boolean(false)]),
    })
}

fn is_word(text: &str) -> bool {
    static WORD: OnceLock<Option<Regex>> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"^\w+$").ok()).as_ref().map_or(false, |re| re.is_match(text))
}

/// Turns text into a number or a symbol; anything else stays as it is.
fn introduce_fn(_ev: &mut Evaluator, args: &[Expr]) -> Result<Expr, OpError> {
    let text = args[0].as_str().ok_or_else(|| OpError::invalid("Introduce requires string"))?;
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() { return Ok(Expr::number(n)); }
    }
    if is_word(text) { return Ok(Expr::symbol(text)); }
    Ok(Expr::call("Introduce", args.to_vec()))
}

#[cfg(test)]
mod tests {
    use crate::test_support::eval_one;
    use pretty_assertions::assert_eq;

    #[test]
    fn concat_is_flat() {
        assert_eq!(eval_one(r#"Concat["a", Concat["b", "c"]]"#), r#""abc""#);
        assert!(eval_one(r#"Concat["a", 1]"#).contains("Concat requires list of strings"));
    }

    #[test]
    fn substring() {
        assert_eq!(eval_one(r#"Substring["termix", 1, 3]"#), r#""erm""#);
        assert!(eval_one(r#"Substring["ab", 1, 5]"#).contains("out of bounds"));
    }

    #[test]
    fn split_drops_empty_pieces() {
        assert_eq!(eval_one(r#"Split["a,,b;c", ",", ";"]"#), r#"List["a", "b", "c"]"#);
        assert_eq!(eval_one(r#"Split["a b", List[" "]]"#), r#"List["a", "b"]"#);
    }

    #[test]
    fn regex_match() {
        assert_eq!(eval_one(r#"Match["abc123", "[0-9]+"]"#), "Entry[3, 3]");
        assert_eq!(eval_one(r#"Match["abc", "[0-9]+"]"#), "Entry[False]");
        assert!(eval_one(r#"Match["abc", "("]"#).contains("Invalid pattern"));
    }

    #[test]
    fn introduce() {
        assert_eq!(eval_one(r#"Introduce["42"]"#), "42");
        assert_eq!(eval_one(r#"Introduce["name"]"#), "name");
        assert_eq!(eval_one(r#"Introduce["a b"]"#), r#"Introduce["a b"]"#);
    }
}
