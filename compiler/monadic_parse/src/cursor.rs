//! Token cursor over the tokens of a single statement.
//!
//! The splitter hands each statement its own slice, so "end of input" for the
//! cursor means the end of that statement, not of the source.

use monadic_ir::{Span, Token, TokenKind};

use crate::{ParseError, ParseErrorKind, ParseResult};

pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Span reported when the statement ends early.
    end: Span,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Token], end: Span) -> Self {
        Cursor {
            tokens,
            pos: 0,
            end,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub(crate) fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.current().map(|t| &t.kind)
    }

    #[inline]
    pub(crate) fn peek_nth_kind(&self, n: usize) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos + n).map(|t| &t.kind)
    }

    #[inline]
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Span of the current token, or the end span once exhausted.
    pub(crate) fn current_span(&self) -> Span {
        self.current().map_or(self.end, |t| t.span)
    }

    /// Span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.end, |t| t.span)
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> ParseResult<Span> {
        if self.check(kind) {
            let span = self.current_span();
            self.pos += 1;
            Ok(span)
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Every token of the statement must be consumed.
    pub(crate) fn expect_end(&self) -> ParseResult<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.unexpected("end of statement"))
        }
    }

    #[cold]
    pub(crate) fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected,
                    found: token.kind.describe(),
                },
                token.span,
            ),
            None => ParseError::new(ParseErrorKind::UnexpectedEnd { expected }, self.end),
        }
    }

    /// Offset (relative to the current position) of the delimiter closing the
    /// opener at relative offset `open`.
    ///
    /// The splitter has already checked nesting, so a simple depth count is
    /// enough here.
    pub(crate) fn closing_offset(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, token) in self.tokens.get(self.pos + open..)?.iter().enumerate() {
            if token.kind.is_opening() {
                depth += 1;
            } else if token.kind.opening_pair().is_some() {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
        }
        None
    }

    /// Number of tokens not yet consumed.
    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }
}
