//! Parser for the monadic statement language.
//!
//! Turns embedded source text into a [`Program`]: the ordered statement units
//! the dispatcher walks. Parsing is pure; the same source always produces an
//! equal `Program`, and nothing is evaluated here.
//!
//! # Pipeline
//!
//! 1. `monadic_lexer::lex` tokenizes the source. Literal contents and comments
//!    never produce `;` or delimiter tokens, so they cannot end a unit.
//! 2. The splitter walks the tokens, cutting at top-level `;`, checking
//!    delimiter nesting and folding `if`/`else if`/`else` chains.
//! 3. Each statement's tokens are parsed into a marker form or a plain
//!    expression.

mod cursor;
mod error;
mod grammar;
mod split;

pub use error::{ParseError, ParseErrorKind, ParseResult};
use monadic_ir::{Program, Span, TokenKind};

/// Parse embedded source text into a [`Program`].
///
/// # Errors
///
/// Returns the first [`ParseError`] found: a malformed literal, unbalanced
/// nesting, an incomplete conditional chain, a misplaced marker form, a
/// malformed expression, or a source with no statements at all.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> ParseResult<Program> {
    let tokens = monadic_lexer::lex(source);

    let lex_error = tokens.iter().find_map(|t| match t.kind {
        TokenKind::Error(kind) => Some(ParseError::new(ParseErrorKind::Lex(kind), t.span)),
        _ => None,
    });
    if let Some(error) = lex_error {
        return Err(error);
    }

    let splitter = split::Splitter::new(tokens.as_slice());
    let units = splitter.units(0, splitter.eof())?;
    if units.is_empty() {
        let end = Span::point(u32::try_from(source.len()).unwrap_or(u32::MAX));
        return Err(ParseError::new(ParseErrorKind::EmptyProgram, end));
    }

    tracing::debug!(units = units.len(), "parsed program");
    Ok(Program::new(units))
}
