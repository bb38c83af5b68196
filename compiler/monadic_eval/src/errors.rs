//! Evaluation errors.
//!
//! Every failure of the engine is an [`EvalError`]. None are recovered
//! internally; they propagate with `?` to the caller of `evaluate`.
//!
//! Factory functions below build the common variants so call sites stay
//! short and the error construction stays off the hot path (`#[cold]`).

use monadic_ir::BinaryOp;
use monadic_parse::ParseError;

use crate::scope::ReservedName;

pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// The source failed to parse; nothing was evaluated.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The dispatcher ran out of units (for example after a trailing `let`).
    #[error("monadic sequence is empty")]
    EmptySequence,

    #[error("`{name}` is a reserved name and cannot be bound")]
    ReservedName { name: ReservedName },

    // Capability contract
    #[error("{capability} does not implement zero")]
    ZeroNotImplemented { capability: &'static str },

    #[error("{capability} does not implement combine")]
    CombineNotImplemented { capability: &'static str },

    #[error("{capability} does not implement bind")]
    BindNotImplemented { capability: &'static str },

    #[error("{capability} does not implement do")]
    DoNotImplemented { capability: &'static str },

    #[error("{capability} violates the capability contract: {reason}")]
    InvariantViolation {
        capability: &'static str,
        reason: &'static str,
    },

    #[error("{capability} can only combine numbers, got {left} and {right}")]
    UnsupportedCombine {
        capability: &'static str,
        left: String,
        right: String,
    },

    #[error("{capability} expected {expected}, got {got}")]
    UnexpectedValue {
        capability: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error("`{marker}` may only appear as the last statement of a branch body")]
    MisplacedMarker { marker: &'static str },

    // Expressions
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("invalid operands for `{op}`: {left} and {right}")]
    InvalidBinaryOperands {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("`{function}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    /// A host-provided native function failed.
    #[error("{function}: {message}")]
    Native { function: String, message: String },
}

impl EvalError {
    /// Error for a host function, for use inside [`crate::NativeFunction`]s.
    #[cold]
    pub fn native(function: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Native {
            function: function.into(),
            message: message.into(),
        }
    }
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::UndefinedVariable {
        name: name.to_string(),
    }
}

#[cold]
pub fn type_mismatch(expected: &'static str, got: &crate::Value) -> EvalError {
    EvalError::TypeMismatch {
        expected,
        got: got.type_name(),
    }
}

#[cold]
pub fn invalid_operands(op: BinaryOp, left: &crate::Value, right: &crate::Value) -> EvalError {
    EvalError::InvalidBinaryOperands {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::IntegerOverflow { operation }
}

#[cold]
pub fn arity_mismatch(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::ArityMismatch {
        function: function.to_string(),
        expected,
        got,
    }
}

#[cold]
pub fn unexpected_value(
    capability: &'static str,
    expected: &'static str,
    got: &crate::Value,
) -> EvalError {
    EvalError::UnexpectedValue {
        capability,
        expected,
        got: got.type_name(),
    }
}

#[cold]
pub fn unsupported_combine(
    capability: &'static str,
    left: &crate::Value,
    right: &crate::Value,
) -> EvalError {
    EvalError::UnsupportedCombine {
        capability,
        left: format!("{left:?}"),
        right: format!("{right:?}"),
    }
}
