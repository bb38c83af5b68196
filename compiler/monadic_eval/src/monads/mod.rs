//! Built-in capabilities.
//!
//! | Capability | Wrapped | combine | delay |
//! |---|---|---|---|
//! | [`ListMonad`] | `Vec<Value>` | concatenation | yes |
//! | [`MaybeMonad`] | `Option<Value>` | numeric add, present-biased | yes |
//! | [`EitherMonad`] | `Result<Value, Value>` | numeric add, failure-biased | yes |
//! | [`StateMonad`] | [`StateFn`] | - | - |
//! | [`SeqMonad`] | [`Seq`] | lazy append | yes |
//! | [`PauseMonad`] | [`Coroutine`] | - | - |

mod either;
mod list;
mod maybe;
mod pause;
mod seq;
mod state;

pub use either::EitherMonad;
pub use list::ListMonad;
pub use maybe::MaybeMonad;
pub use pause::{pause, Coroutine, PauseMonad, Step};
pub use seq::{counter, empty_seq, Seq, SeqMonad, SeqNode};
pub use state::{get_state, set_state, StateFn, StateMonad, StateResult};
