//! Statement and expression grammar.
//!
//! - `statement.rs`: marker forms and plain expression statements
//! - `expr.rs`: precedence climbing over binary, unary, call and primary

mod expr;
mod statement;

/// Call-shaped marker forms. `let` is a keyword and handled separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Marker {
    Unit,
    Unit2,
    Bind,
    Do,
    MonadDo,
}

impl Marker {
    pub(crate) fn from_ident(name: &str) -> Option<Self> {
        match name {
            "unit" => Some(Marker::Unit),
            "unit2" => Some(Marker::Unit2),
            "bind" => Some(Marker::Bind),
            "do" => Some(Marker::Do),
            "monad_do" => Some(Marker::MonadDo),
            _ => None,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Marker::Unit => "unit",
            Marker::Unit2 => "unit2",
            Marker::Bind => "bind",
            Marker::Do => "do",
            Marker::MonadDo => "monad_do",
        }
    }
}
