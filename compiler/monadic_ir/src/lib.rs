//! Shared IR types for the monadic engine.
//!
//! - [`Span`]: byte ranges into the embedded source
//! - [`Name`]: shared identifier strings
//! - [`Token`], [`TokenKind`], [`TokenList`]: lexer output
//! - [`Program`], [`StatementUnit`], [`Expr`]: parser output

mod ast;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, Branch, ConditionalGroup, Expr, ExprKind, Program, Statement, StatementKind,
    StatementUnit, UnaryOp,
};
pub use name::Name;
pub use span::Span;
pub use token::{LexErrorKind, Token, TokenKind, TokenList};
