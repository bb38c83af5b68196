//! Splitting a token stream into statement units.
//!
//! Units end at a `;` that sits outside every `()`, `[]` and `{}`. A chain of
//! `if (..) {..} else if (..) {..} else {..}` at the start of a unit is folded
//! into one [`ConditionalGroup`]; branch bodies are split recursively.
//!
//! All positions here are indices into the full token list, whose last token
//! is always `Eof`.

use monadic_ir::{
    Branch, ConditionalGroup, Expr, Span, Statement, StatementKind, StatementUnit, Token,
    TokenKind,
};
use monadic_stack::ensure_sufficient_stack;

use crate::cursor::Cursor;
use crate::{ParseError, ParseErrorKind, ParseResult};

fn delimiter(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::LParen => "(",
        TokenKind::RParen => ")",
        TokenKind::LBrace => "{",
        TokenKind::RBrace => "}",
        TokenKind::LBracket => "[",
        TokenKind::RBracket => "]",
        _ => "",
    }
}

fn closing_for(open: &TokenKind) -> &'static str {
    match open {
        TokenKind::LParen => ")",
        TokenKind::LBrace => "}",
        TokenKind::LBracket => "]",
        _ => "",
    }
}

/// Open delimiters seen so far, innermost last.
struct Nesting<'a> {
    stack: Vec<&'a Token>,
}

impl<'a> Nesting<'a> {
    fn new() -> Self {
        Nesting { stack: Vec::new() }
    }

    #[inline]
    fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Track `token`, failing on a closer that matches nothing.
    fn track(&mut self, token: &'a Token) -> ParseResult<()> {
        if token.kind.is_opening() {
            self.stack.push(token);
            return Ok(());
        }
        let Some(expected_open) = token.kind.opening_pair() else {
            return Ok(());
        };
        match self.stack.pop() {
            Some(open) if open.kind == expected_open => Ok(()),
            Some(open) => Err(ParseError::new(
                ParseErrorKind::MismatchedDelimiter {
                    expected: closing_for(&open.kind),
                    found: delimiter(&token.kind),
                },
                token.span,
            )),
            None => Err(ParseError::new(
                ParseErrorKind::UnexpectedClosingDelimiter {
                    found: delimiter(&token.kind),
                },
                token.span,
            )),
        }
    }

    /// Error for input that ended with delimiters still open.
    fn unclosed(&self) -> Option<ParseError> {
        self.stack.last().map(|open| {
            ParseError::new(
                ParseErrorKind::UnclosedDelimiter {
                    open: delimiter(&open.kind),
                },
                open.span,
            )
        })
    }
}

pub(crate) struct Splitter<'a> {
    tokens: &'a [Token],
}

impl<'a> Splitter<'a> {
    /// `tokens` must end with `Eof`.
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Splitter { tokens }
    }

    /// Index of the trailing `Eof`.
    pub(crate) fn eof(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    fn kind_at(&self, index: usize) -> Option<&'a TokenKind> {
        self.tokens.get(index).map(|t| &t.kind)
    }

    fn span_at(&self, index: usize) -> Span {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .map_or(Span::DUMMY, |t| t.span)
    }

    /// Split `tokens[start..end]` into units.
    pub(crate) fn units(&self, start: usize, end: usize) -> ParseResult<Vec<StatementUnit>> {
        let mut units = Vec::new();
        let mut pos = start;

        while pos < end {
            match self.kind_at(pos) {
                // Empty statement.
                Some(TokenKind::Semicolon) => pos += 1,
                Some(TokenKind::Else) => {
                    return Err(ParseError::new(
                        ParseErrorKind::StrayElse,
                        self.span_at(pos),
                    ));
                }
                Some(TokenKind::If) => {
                    let (group, next) = ensure_sufficient_stack(|| self.conditional(pos, end))?;
                    tracing::trace!(span = %group.span, branches = group.branches.len(), "folded conditional");
                    units.push(StatementUnit::Conditional(group));
                    pos = next;
                    if self.kind_at(pos) == Some(&TokenKind::Semicolon) && pos < end {
                        pos += 1;
                    }
                }
                _ => {
                    let stop = self.statement_end(pos, end)?;
                    let statement = self.statement(pos, stop)?;
                    tracing::trace!(span = %statement.span, marker = ?statement.kind.marker_name(), "split statement");
                    units.push(StatementUnit::Statement(statement));
                    pos = stop + 1;
                }
            }
        }

        Ok(units)
    }

    /// Index of the `;` ending the statement that starts at `start`, or `end`
    /// if the statement runs to the end of the range.
    fn statement_end(&self, start: usize, end: usize) -> ParseResult<usize> {
        let mut nesting = Nesting::new();
        for index in start..end {
            let token = &self.tokens[index];
            if token.kind == TokenKind::Semicolon && nesting.depth() == 0 {
                return Ok(index);
            }
            nesting.track(token)?;
        }
        match nesting.unclosed() {
            Some(error) => Err(error),
            None => Ok(end),
        }
    }

    /// Index of the delimiter closing the opener at `open`, searching no
    /// further than `end`.
    fn matching_close(&self, open: usize, end: usize) -> ParseResult<usize> {
        let mut nesting = Nesting::new();
        for index in open..end {
            nesting.track(&self.tokens[index])?;
            if nesting.depth() == 0 {
                return Ok(index);
            }
        }
        Err(nesting.unclosed().unwrap_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEnd {
                    expected: "a closing delimiter",
                },
                self.span_at(end),
            )
        }))
    }

    fn cursor(&self, start: usize, stop: usize) -> Cursor<'a> {
        let end = Span::point(self.span_at(stop).start);
        Cursor::new(&self.tokens[start..stop], end)
    }

    fn statement(&self, start: usize, stop: usize) -> ParseResult<Statement> {
        self.cursor(start, stop).parse_statement()
    }

    fn predicate(&self, start: usize, stop: usize) -> ParseResult<Expr> {
        let mut cursor = self.cursor(start, stop);
        let expr = cursor.parse_expr()?;
        cursor.expect_end()?;
        Ok(expr)
    }

    /// Fold the chain starting at the `if` at `start`. Returns the group and
    /// the index just past its last `}`.
    fn conditional(&self, start: usize, end: usize) -> ParseResult<(ConditionalGroup, usize)> {
        let mut branches = Vec::new();
        let mut otherwise = None;
        let mut pos = start;

        loop {
            let if_span = self.span_at(pos);
            let open = pos + 1;
            if open >= end || self.kind_at(open) != Some(&TokenKind::LParen) {
                return Err(ParseError::new(
                    ParseErrorKind::IncompleteConditional {
                        reason: "expected `(` after `if`",
                    },
                    self.span_at(open),
                ));
            }
            let close = self.matching_close(open, end)?;
            if close == open + 1 {
                return Err(ParseError::new(
                    ParseErrorKind::IncompleteConditional {
                        reason: "missing condition",
                    },
                    self.span_at(open),
                ));
            }
            let predicate = self.predicate(open + 1, close)?;
            let (body, body_close) =
                self.block(close + 1, end, "expected `{` after the condition")?;

            branches.push(Branch {
                predicate,
                body,
                span: if_span.merge(self.span_at(body_close)),
            });
            pos = body_close + 1;

            if pos >= end || self.kind_at(pos) != Some(&TokenKind::Else) {
                break;
            }
            let after_else = pos + 1;
            if after_else < end && self.kind_at(after_else) == Some(&TokenKind::If) {
                pos = after_else;
                continue;
            }
            let (body, body_close) =
                self.block(after_else, end, "expected `if` or `{` after `else`")?;
            otherwise = Some(body);
            pos = body_close + 1;
            break;
        }

        let span = self.span_at(start).merge(self.span_at(pos - 1));
        Ok((
            ConditionalGroup {
                branches,
                otherwise,
                span,
            },
            pos,
        ))
    }

    /// Parse `{ units }` at `open`. Returns the body and the index of `}`.
    fn block(
        &self,
        open: usize,
        end: usize,
        reason: &'static str,
    ) -> ParseResult<(Vec<StatementUnit>, usize)> {
        if open >= end || self.kind_at(open) != Some(&TokenKind::LBrace) {
            return Err(ParseError::new(
                ParseErrorKind::IncompleteConditional { reason },
                self.span_at(open),
            ));
        }
        let close = self.matching_close(open, end)?;
        let body = self.units(open + 1, close)?;
        if body.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyBranchBody,
                self.span_at(open),
            ));
        }
        check_branch_body(&body)?;
        Ok((body, close))
    }
}

/// Only the last unit of a branch body may produce a marker other than `let`.
fn check_branch_body(body: &[StatementUnit]) -> ParseResult<()> {
    let Some((_, prefix)) = body.split_last() else {
        return Ok(());
    };
    for unit in prefix {
        if let Some((marker, span)) = tail_marker(unit) {
            return Err(ParseError::new(
                ParseErrorKind::MarkerBeforeEndOfBranch { marker },
                span,
            ));
        }
    }
    Ok(())
}

/// A non-`let` marker that `unit` may produce, if any.
fn tail_marker(unit: &StatementUnit) -> Option<(&'static str, Span)> {
    match unit {
        StatementUnit::Statement(statement) => match statement.kind {
            StatementKind::Let { .. } | StatementKind::Expr(_) => None,
            _ => statement.kind.marker_name().map(|m| (m, statement.span)),
        },
        StatementUnit::Conditional(group) => group
            .branches
            .iter()
            .map(|b| b.body.as_slice())
            .chain(group.otherwise.as_deref())
            .filter_map(|body| body.last())
            .find_map(tail_marker),
    }
}
