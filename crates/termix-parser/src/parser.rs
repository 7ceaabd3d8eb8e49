use crate::error::{ParseResult, SyntaxError};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::ops::OperatorTable;
use termix_core::Expr;

const BRACKET_POWER: i64 = 100_000;

/// Pratt parser over a run-time extensible operator table.
#[derive(Clone)]
pub struct Parser { ops: OperatorTable }

impl Default for Parser {
    fn default() -> Self { Self::new() }
}

impl Parser {
    pub fn new() -> Self { Self { ops: OperatorTable::with_defaults() } }

    pub fn with_operators(ops: OperatorTable) -> Self { Self { ops } }

    pub fn operators(&self) -> &OperatorTable { &self.ops }
    pub fn operators_mut(&mut self) -> &mut OperatorTable { &mut self.ops }

    /// Parses exactly one expression; leftover tokens are an error.
    pub fn parse(&self, src: &str) -> ParseResult<Expr> {
        let texts = self.ops.texts();
        let tokens = tokenize(src, &texts)?;
        let mut cur = Cursor { tokens: &tokens, pos: 0, ops: &self.ops };
        let e = cur.parse_expr(i64::MIN)?;
        match cur.peek() {
            Some(t) => Err(SyntaxError::Trailing { token: t.text.to_string(), offset: t.offset }),
            None => Ok(e),
        }
    }
}

struct Cursor<'t, 's> {
    tokens: &'t [Token<'s>],
    pos: usize,
    ops: &'t OperatorTable,
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(n) = chars.next() { out.push(n); }
        } else {
            out.push(c);
        }
    }
    out
}

impl<'t, 's> Cursor<'t, 's> {
    fn peek(&self) -> Option<&'t Token<'s>> { self.tokens.get(self.pos) }

    /// The token consumed last.
    fn current(&self) -> Option<&'t Token<'s>> { self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) }

    fn advance(&mut self) -> ParseResult<&'t Token<'s>> {
        let t = self.tokens.get(self.pos).ok_or(SyntaxError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(t)
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<&'t Token<'s>> {
        let t = self.advance()?;
        if t.kind != kind { return Err(SyntaxError::Unexpected { found: t.kind, expected: kind, offset: t.offset }); }
        Ok(t)
    }

    fn infix_power(&self, t: &Token<'s>) -> ParseResult<i64> {
        match t.kind {
            TokenKind::OpenBracket => Ok(BRACKET_POWER),
            TokenKind::Operator => match self.ops.infix(t.text) {
                Some(op) => Ok(op.power as i64),
                None => Err(SyntaxError::OperatorPosition { op: t.text.to_string(), position: "infix", offset: t.offset }),
            },
            _ => Ok(i64::MIN),
        }
    }

    fn parse_expr(&mut self, rbp: i64) -> ParseResult<Expr> {
        let introducer = self.current();
        let mut left = self.parse_prefix()?;
        while let Some(next) = self.peek() {
            let power = self.infix_power(next)?;
            // a right-associative operator keeps folding into its own right operand
            let same_right_assoc = introducer.map_or(false, |p| {
                p.kind == TokenKind::Operator
                    && next.kind == TokenKind::Operator
                    && p.text == next.text
                    && self.ops.infix(p.text).map_or(false, |op| op.right_assoc)
            });
            if power > rbp || same_right_assoc { left = self.parse_infix(left)?; } else { break; }
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let t = self.advance()?;
        match t.kind {
            TokenKind::Number => t.text.parse::<f64>().map(Expr::number).map_err(|_| SyntaxError::InvalidNumber(t.text.to_string())),
            TokenKind::Symbol => Ok(Expr::symbol(t.text)),
            TokenKind::String => Ok(Expr::string(unescape(t.text))),
            TokenKind::OpenGroup => {
                let inner = self.parse_expr(i64::MIN)?;
                self.expect(TokenKind::CloseGroup)?;
                Ok(inner)
            }
            TokenKind::Operator => {
                let ops = self.ops;
                let op = ops.prefix(t.text).ok_or_else(|| SyntaxError::OperatorPosition {
                    op: t.text.to_string(),
                    position: "prefix",
                    offset: t.offset,
                })?;
                // `-` glued to a digit is a negative literal, so `-1[x]` applies -1
                if let Some(n) = self.peek().filter(|n| t.text == "-" && n.kind == TokenKind::Number && n.offset == t.offset + 1) {
                    self.advance()?;
                    let v = n.text.parse::<f64>().map_err(|_| SyntaxError::InvalidNumber(n.text.to_string()))?;
                    return Ok(Expr::number(-v));
                }
                let arg = self.parse_expr(op.power as i64)?;
                Ok((op.build)(arg))
            }
            _ => Err(SyntaxError::NoPrefix { token: t.text.to_string(), offset: t.offset }),
        }
    }

    fn parse_infix(&mut self, left: Expr) -> ParseResult<Expr> {
        let t = self.advance()?;
        match t.kind {
            TokenKind::OpenBracket => {
                let mut args = Vec::new();
                match self.peek() {
                    None => return Err(SyntaxError::UnexpectedEnd),
                    Some(p) if p.kind == TokenKind::CloseBracket => {}
                    Some(_) => {
                        args.push(self.parse_expr(i64::MIN)?);
                        while self.peek().map(|p| p.kind) == Some(TokenKind::Comma) {
                            self.advance()?;
                            args.push(self.parse_expr(i64::MIN)?);
                        }
                    }
                }
                self.expect(TokenKind::CloseBracket)?;
                Ok(Expr::apply(left, args))
            }
            TokenKind::Operator => {
                let ops = self.ops;
                let op = ops.infix(t.text).ok_or_else(|| SyntaxError::OperatorPosition {
                    op: t.text.to_string(),
                    position: "infix",
                    offset: t.offset,
                })?;
                let right = self.parse_expr(op.power as i64)?;
                Ok((op.build)(left, right))
            }
            _ => Err(SyntaxError::NoInfix { token: t.text.to_string(), offset: t.offset }),
        }
    }
}
