//! Evaluation engine for the monadic statement language.
//!
//! An [`Evaluator`] pairs a [`Capability`] (the monad being composed) with
//! the dispatcher that walks a parsed program. Statements marked `bind`, `do`
//! and `unit` are handed to the capability; `let` and plain statements are
//! evaluated in place.
//!
//! # Example
//!
//! ```text
//! let evaluator = Evaluator::new(MaybeMonad)?;
//! let scope = Scope::prelude().with("div_by", Value::native("div_by", div_by));
//! let result = evaluator.evaluate("bind(x, div_by(10, 2)); unit(x)", scope)?;
//! ```

mod capability;
mod errors;
mod evaluator;
mod interpreter;
mod marker;
pub mod monads;
mod operators;
mod scope;
mod value;

pub use capability::{Capability, CapabilityFlags, Continuation, Resume, Thunk};
pub use errors::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use interpreter::eval_expr;
pub use marker::{eval_unit, MarkerResult};
pub use monads::{
    counter, empty_seq, get_state, pause, set_state, Coroutine, EitherMonad, ListMonad,
    MaybeMonad, PauseMonad, Seq, SeqMonad, SeqNode, StateFn, StateMonad, StateResult, Step,
};
pub use operators::{evaluate_binary, evaluate_unary};
pub use scope::{ReservedName, Scope};
pub use value::{expect_args, NativeFn, NativeFunction, Value};
