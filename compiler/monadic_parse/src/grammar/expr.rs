//! Expression parsing.
//!
//! Binary operators use precedence climbing on [`BinaryOp::precedence`].
//! Every recursive entry goes through `ensure_sufficient_stack`, so deeply
//! nested parentheses or unary chains grow the stack instead of overflowing.

use std::rc::Rc;

use monadic_ir::{BinaryOp, Expr, ExprKind, TokenKind, UnaryOp};
use monadic_stack::ensure_sufficient_stack;

use super::Marker;
use crate::cursor::Cursor;
use crate::{ParseError, ParseErrorKind, ParseResult};

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    })
}

impl Cursor<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.parse_binary(1))
    }

    fn parse_binary(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.peek_kind().and_then(binary_op) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            // Left-associative: the right operand binds strictly tighter.
            let right = ensure_sufficient_stack(|| self.parse_binary(prec + 1))?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek_kind() {
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::Minus) => UnaryOp::Neg,
            _ => return self.parse_postfix(),
        };
        let start = self.current_span();
        self.advance();

        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        while self.check(&TokenKind::LParen) {
            let args = self.parse_call_args()?;
            let span = expr.span.merge(self.previous_span());
            expr = Expr::new(
                ExprKind::Call {
                    callee: Box::new(expr),
                    args,
                },
                span,
            );
        }

        Ok(expr)
    }

    /// Parse `( expr, ... )`, allowing a trailing comma.
    pub(crate) fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(&TokenKind::LParen, "`(`")?;
        self.parse_comma_list(&TokenKind::RParen, "`,` or `)`")
    }

    fn parse_comma_list(
        &mut self,
        close: &TokenKind,
        expected: &'static str,
    ) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_expr()?);
            if !self.check(close) {
                self.expect(&TokenKind::Comma, expected)?;
            }
        }
        self.expect(close, expected)?;
        Ok(items)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.current() else {
            return Err(self.unexpected("an expression"));
        };
        let span = token.span;

        let kind = match &token.kind {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(bits) => ExprKind::Float(f64::from_bits(*bits)),
            TokenKind::Str(s) => ExprKind::Str(Rc::clone(s)),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::Ident(name) => {
                if let Some(marker) = Marker::from_ident(name.as_str()) {
                    if self.peek_nth_kind(1) == Some(&TokenKind::LParen) {
                        return Err(ParseError::new(
                            ParseErrorKind::MarkerNotStatement {
                                marker: marker.as_str(),
                            },
                            span,
                        ));
                    }
                }
                ExprKind::Ident(name.clone())
            }
            TokenKind::Let => {
                return Err(ParseError::new(
                    ParseErrorKind::MarkerNotStatement { marker: "let" },
                    span,
                ));
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen, "`)`")?;
                return Ok(Expr::new(inner.kind, span.merge(self.previous_span())));
            }
            TokenKind::LBracket => {
                self.advance();
                let items = self.parse_comma_list(&TokenKind::RBracket, "`,` or `]`")?;
                return Ok(Expr::new(
                    ExprKind::List(items),
                    span.merge(self.previous_span()),
                ));
            }
            _ => return Err(self.unexpected("an expression")),
        };

        self.advance();
        Ok(Expr::new(kind, span))
    }
}
