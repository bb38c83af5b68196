//! Statement parsing: marker forms and plain expression statements.

use monadic_ir::{Expr, ExprKind, Name, Span, Statement, StatementKind, TokenKind};

use super::Marker;
use crate::cursor::Cursor;
use crate::{ParseError, ParseErrorKind, ParseResult};

impl Cursor<'_> {
    /// Parse the tokens of one statement. All of them must be consumed.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let start = self.current_span();

        let kind = match self.peek_kind() {
            Some(TokenKind::Let) => self.parse_let()?,
            Some(TokenKind::Ident(name)) => match Marker::from_ident(name.as_str()) {
                Some(marker) if self.is_whole_call() => self.parse_marker(marker)?,
                // `unit(1) + 2` and friends fall through and are rejected
                // by the expression parser.
                _ => StatementKind::Expr(self.parse_expr()?),
            },
            _ => StatementKind::Expr(self.parse_expr()?),
        };

        self.expect_end()?;
        Ok(Statement {
            kind,
            span: start.merge(self.previous_span()),
        })
    }

    /// `name(...)` with nothing after the closing parenthesis.
    fn is_whole_call(&self) -> bool {
        self.peek_nth_kind(1) == Some(&TokenKind::LParen)
            && self.closing_offset(1) == Some(self.remaining().saturating_sub(1))
    }

    /// `let(name, value)` or `let name = value`.
    fn parse_let(&mut self) -> ParseResult<StatementKind> {
        let start = self.current_span();
        self.advance();

        match self.peek_kind() {
            Some(TokenKind::LParen) => {
                let args = self.parse_call_args()?;
                let span = start.merge(self.previous_span());
                let (name, value) = binding_args("let", args, span)?;
                Ok(StatementKind::Let { name, value })
            }
            Some(TokenKind::Ident(name))
                if self.peek_nth_kind(1) == Some(&TokenKind::Assign) =>
            {
                let name = name.clone();
                self.advance();
                self.advance();
                let value = self.parse_expr()?;
                Ok(StatementKind::Let { name, value })
            }
            _ => Err(self.unexpected("`(` or a name after `let`")),
        }
    }

    fn parse_marker(&mut self, marker: Marker) -> ParseResult<StatementKind> {
        let start = self.current_span();
        self.advance();
        let args = self.parse_call_args()?;
        let span = start.merge(self.previous_span());

        let name = marker.as_str();
        Ok(match marker {
            Marker::Unit => StatementKind::Unit(single_arg(name, args, span)?),
            Marker::Unit2 => StatementKind::Unit2(single_arg(name, args, span)?),
            Marker::Do | Marker::MonadDo => StatementKind::Do(single_arg(name, args, span)?),
            Marker::Bind => {
                let (name, value) = binding_args(name, args, span)?;
                StatementKind::Bind { name, value }
            }
        })
    }
}

fn single_arg(marker: &'static str, args: Vec<Expr>, span: Span) -> ParseResult<Expr> {
    let got = args.len();
    match <[Expr; 1]>::try_from(args) {
        Ok([value]) => Ok(value),
        Err(_) => Err(ParseError::new(
            ParseErrorKind::MarkerArity {
                marker,
                expected: 1,
                got,
            },
            span,
        )),
    }
}

/// Split `(name, value)` arguments. The name is an identifier or a string.
fn binding_args(marker: &'static str, args: Vec<Expr>, span: Span) -> ParseResult<(Name, Expr)> {
    let got = args.len();
    let Ok([name, value]) = <[Expr; 2]>::try_from(args) else {
        return Err(ParseError::new(
            ParseErrorKind::MarkerArity {
                marker,
                expected: 2,
                got,
            },
            span,
        ));
    };

    let name = match name.kind {
        ExprKind::Ident(name) => name,
        ExprKind::Str(s) => Name::new(&s),
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::InvalidBindingName { marker },
                name.span,
            ))
        }
    };
    Ok((name, value))
}
