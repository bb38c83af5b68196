//! Parse error types.

use monadic_ir::{LexErrorKind, Span};

pub type ParseResult<T> = Result<T, ParseError>;

/// What went wrong while splitting or parsing the source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Lex(LexErrorKind),

    #[error("unclosed delimiter `{open}`")]
    UnclosedDelimiter { open: &'static str },

    #[error("unexpected closing delimiter `{found}`")]
    UnexpectedClosingDelimiter { found: &'static str },

    #[error("mismatched delimiter: expected `{expected}`, found `{found}`")]
    MismatchedDelimiter {
        expected: &'static str,
        found: &'static str,
    },

    #[error("incomplete conditional: {reason}")]
    IncompleteConditional { reason: &'static str },

    #[error("`else` without a preceding `if`")]
    StrayElse,

    #[error("conditional branch has an empty body")]
    EmptyBranchBody,

    #[error("`{marker}` must be a whole statement, not part of an expression")]
    MarkerNotStatement { marker: &'static str },

    #[error("`{marker}` expects {expected} argument(s), got {got}")]
    MarkerArity {
        marker: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("`{marker}` expects a name (identifier or string literal) as its first argument")]
    InvalidBindingName { marker: &'static str },

    #[error("`{marker}` may only appear as the last statement of a branch body")]
    MarkerBeforeEndOfBranch { marker: &'static str },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("expected {expected}, found end of statement")]
    UnexpectedEnd { expected: &'static str },

    #[error("source contains no statements")]
    EmptyProgram,
}

/// A parse failure with the byte position where it was detected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at byte {})", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// Byte offset of the error in the source text.
    #[inline]
    pub fn position(&self) -> u32 {
        self.span.start
    }

    /// 1-based line and column of the error in `source`.
    pub fn line_col(&self, source: &str) -> (u32, u32) {
        self.span.line_col(source)
    }
}
