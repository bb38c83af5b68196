//! Statement and expression AST for the embedded monadic language.
//!
//! A source text parses into a [`Program`]: an ordered, immutable sequence
//! of [`StatementUnit`]s. Each unit yields exactly one marker result when
//! evaluated, whether it is a single statement or a folded conditional chain.

use std::fmt;
use std::rc::Rc;

use crate::{Name, Span};

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Binding power for precedence climbing. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::NotEq => 3,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 6,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    Null,
    Ident(Name),
    List(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

/// One statement of the embedded language.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

/// The role a statement plays in the monadic sequence.
///
/// Every variant except `Expr` is a marker form recognized by the dispatcher.
#[derive(Clone, Debug, PartialEq)]
pub enum StatementKind {
    /// `let(name, value)` or `let name = value`
    Let { name: Name, value: Expr },
    /// `unit(value)`
    Unit(Expr),
    /// `unit2(value)`
    Unit2(Expr),
    /// `bind(name, value)`
    Bind { name: Name, value: Expr },
    /// `do(value)` / `monad_do(value)`
    Do(Expr),
    /// Any other expression statement.
    Expr(Expr),
}

impl StatementKind {
    /// Marker name as written in source, or `None` for plain expressions.
    pub fn marker_name(&self) -> Option<&'static str> {
        match self {
            StatementKind::Let { .. } => Some("let"),
            StatementKind::Unit(_) => Some("unit"),
            StatementKind::Unit2(_) => Some("unit2"),
            StatementKind::Bind { .. } => Some("bind"),
            StatementKind::Do(_) => Some("do"),
            StatementKind::Expr(_) => None,
        }
    }
}

/// `if (predicate) { body }` or `else if (predicate) { body }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    pub predicate: Expr,
    pub body: Vec<StatementUnit>,
    pub span: Span,
}

/// A complete `if / else if* / else?` chain folded into one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalGroup {
    /// The `if` branch followed by every `else if` branch, in source order.
    pub branches: Vec<Branch>,
    /// Body of the final unconditional `else`, if present.
    pub otherwise: Option<Vec<StatementUnit>>,
    pub span: Span,
}

/// Atomic unit of a monadic sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum StatementUnit {
    Statement(Statement),
    Conditional(ConditionalGroup),
}

impl StatementUnit {
    pub fn span(&self) -> Span {
        match self {
            StatementUnit::Statement(stmt) => stmt.span,
            StatementUnit::Conditional(group) => group.span,
        }
    }
}

/// A parsed source text.
///
/// Units sit behind an `Rc` so continuations captured by a capability can
/// keep the remainder of the sequence alive without copying it.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    units: Rc<[StatementUnit]>,
}

impl Program {
    pub fn new(units: Vec<StatementUnit>) -> Self {
        Program {
            units: Rc::from(units),
        }
    }

    #[inline]
    pub fn units(&self) -> &Rc<[StatementUnit]> {
        &self.units
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
