//! The capability contract a monad instance implements.
//!
//! A capability is the set of composition operations the dispatcher calls
//! while walking a program. Only `lift` and `unit` are required; the other
//! operations have defaults that either pass values through or fail at the
//! point of use with a `*NotImplemented` error.
//!
//! Whether `combine`, `delay` and `run` participate is declared up front via
//! [`Capability::flags`], so the dispatcher never probes for them at runtime.

use std::rc::Rc;

use bitflags::bitflags;

use crate::{EvalError, EvalResult, Value};

bitflags! {
    /// Optional operations a capability opts into.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CapabilityFlags: u8 {
        /// `unit` followed by more statements is combined with the rest.
        const COMBINE = 1;
        /// The rest of a sequence is handed over as a thunk.
        const DELAY = 1 << 1;
        /// The top-level result is post-processed by `run`.
        const RUN = 1 << 2;
    }
}

impl CapabilityFlags {
    #[inline]
    pub fn has_combine(self) -> bool {
        self.contains(CapabilityFlags::COMBINE)
    }

    #[inline]
    pub fn has_delay(self) -> bool {
        self.contains(CapabilityFlags::DELAY)
    }

    #[inline]
    pub fn has_run(self) -> bool {
        self.contains(CapabilityFlags::RUN)
    }
}

/// The rest of the sequence after a `bind`, given the bound value.
///
/// Shared and callable any number of times: List calls it once per element,
/// State and Coroutine store it inside the value they build.
pub type Continuation<W> = Rc<dyn Fn(Value) -> EvalResult<W>>;

/// The rest of the sequence after a `do`.
pub type Resume<W> = Rc<dyn Fn() -> EvalResult<W>>;

/// The rest of the sequence after a non-final `unit`, evaluated on demand.
pub type Thunk<W> = Box<dyn FnOnce() -> EvalResult<W>>;

pub trait Capability: 'static {
    /// The wrapped type this capability composes.
    type Wrapped: 'static;

    /// Name used in diagnostics and logs.
    const NAME: &'static str;

    /// The optional operations this capability implements.
    ///
    /// Overriding `combine`, `delay` or `run` must be matched by declaring
    /// its flag here. The dispatcher consults only the flags, so an
    /// undeclared override is never called.
    fn flags(&self) -> CapabilityFlags {
        CapabilityFlags::empty()
    }

    /// Accept a runtime value given to `bind`, `do` or `unit2`.
    ///
    /// Fails with `UnexpectedValue` when the value is not of this
    /// capability's wrapped kind.
    fn lift(&self, value: Value) -> EvalResult<Self::Wrapped>;

    fn unit(&self, value: Value) -> EvalResult<Self::Wrapped>;

    fn bind(
        &self,
        wrapped: Self::Wrapped,
        k: Continuation<Self::Wrapped>,
    ) -> EvalResult<Self::Wrapped> {
        let _ = (wrapped, k);
        Err(EvalError::BindNotImplemented {
            capability: Self::NAME,
        })
    }

    fn monad_do(&self, wrapped: Self::Wrapped, k: Resume<Self::Wrapped>) -> EvalResult<Self::Wrapped> {
        let _ = (wrapped, k);
        Err(EvalError::DoNotImplemented {
            capability: Self::NAME,
        })
    }

    fn unit2(&self, wrapped: Self::Wrapped) -> EvalResult<Self::Wrapped> {
        Ok(wrapped)
    }

    fn zero(&self) -> EvalResult<Self::Wrapped> {
        Err(EvalError::ZeroNotImplemented {
            capability: Self::NAME,
        })
    }

    fn combine(&self, first: Self::Wrapped, rest: Self::Wrapped) -> EvalResult<Self::Wrapped> {
        let _ = (first, rest);
        Err(EvalError::CombineNotImplemented {
            capability: Self::NAME,
        })
    }

    fn delay(&self, thunk: Thunk<Self::Wrapped>) -> EvalResult<Self::Wrapped> {
        thunk()
    }

    fn run(&self, wrapped: Self::Wrapped) -> EvalResult<Self::Wrapped> {
        Ok(wrapped)
    }
}
