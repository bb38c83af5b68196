//! Compose functions that return wrapped results by running small embedded
//! programs.
//!
//! Host code supplies a capability (one of the built-in monads or its own
//! [`Capability`] implementation) and a [`Scope`] of bindings; embedded code
//! marks each statement with the role it plays:
//!
//! ```text
//! bind(x, div_by(100, 5));
//! let y = x + 1;
//! unit(y)
//! ```
//!
//! The parser lives in [`monadic_parse`], the dispatcher and monad instances
//! in [`monadic_eval`]. This crate re-exports both.

use std::sync::Once;

pub use monadic_eval::{
    counter, empty_seq, eval_expr, eval_unit, evaluate_binary, evaluate_unary, expect_args,
    get_state, monads, pause, set_state, Capability, CapabilityFlags, Continuation, Coroutine,
    EitherMonad, EvalError, EvalResult, Evaluator, ListMonad, MarkerResult, MaybeMonad, NativeFn,
    NativeFunction, PauseMonad, ReservedName, Resume, Scope, Seq, SeqMonad, SeqNode, StateFn,
    StateMonad, StateResult, Step, Thunk, Value,
};
pub use monadic_ir::{Name, Program, Span, StatementUnit};
pub use monadic_parse::{parse, ParseError, ParseErrorKind, ParseResult};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber that prints engine logs to stderr.
///
/// Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=monadic_eval=trace`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
            tracing::debug!("tracing initialized");
        }
    });
}
