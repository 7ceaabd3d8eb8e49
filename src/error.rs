use termix_parser::SyntaxError;
use termix_runtime::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 1-based line and column of byte `offset` in `source`.
pub fn position_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset { break; }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// The error message, with the offending source line and a caret when the
/// error carries a position.
pub fn format_error_with_context(error: &Error, source: &str) -> String {
    let Error::Syntax(syntax) = error else { return error.to_string() };
    let Some(offset) = syntax.offset() else { return error.to_string() };
    let (line, col) = position_to_line_col(source, offset);
    let text = source.lines().nth(line - 1).unwrap_or("");
    format!("Error at line {}, column {}: {}\n  {}\n  {}^", line, col, syntax, text, " ".repeat(col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_and_column() {
        assert_eq!(position_to_line_col("ab\ncd", 0), (1, 1));
        assert_eq!(position_to_line_col("ab\ncd", 4), (2, 2));
    }

    #[test]
    fn context_points_at_the_token() {
        let err = Error::from(SyntaxError::Trailing { token: "2".into(), offset: 2 });
        let shown = format_error_with_context(&err, "1 2");
        assert!(shown.starts_with("Error at line 1, column 3"));
        assert!(shown.ends_with("  1 2\n    ^"));
        let end = Error::from(SyntaxError::UnexpectedEnd);
        assert_eq!(format_error_with_context(&end, "f["), "Syntax error: Unexpected end of expression");
    }
}
