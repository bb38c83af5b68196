//! The dispatcher: walks a program's units and hands each marker to the
//! capability.
//!
//! `let` and plain statements are consumed by a loop. Every other marker ends
//! the loop by calling into the capability with a continuation that resumes
//! the walk at the next unit. Continuations own everything they need (the
//! shared unit slice, a copy of the scope, the capability) so a capability is
//! free to call them later, many times, or never.
//!
//! Capabilities call continuations from inside their own `bind`, so the Rust
//! stack grows with the number of binds. Each re-entry goes through
//! `ensure_sufficient_stack`.

use std::rc::Rc;

use monadic_ir::{Name, Program, StatementUnit};
use monadic_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::capability::{Capability, CapabilityFlags, Continuation, Resume};
use crate::marker::{eval_unit, MarkerResult};
use crate::scope::ReservedName;
use crate::{EvalError, EvalResult, Scope, Value};

type Units = Rc<[StatementUnit]>;

struct Inner<C> {
    capability: C,
    flags: CapabilityFlags,
}

/// Evaluates embedded source with a fixed capability.
///
/// Cheap to clone; clones share the capability.
pub struct Evaluator<C: Capability> {
    inner: Rc<Inner<C>>,
}

impl<C: Capability> Clone for Evaluator<C> {
    fn clone(&self) -> Self {
        Evaluator {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: Capability> Evaluator<C> {
    /// Wrap `capability`, checking its declared flags.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the capability declares `COMBINE` without
    /// `DELAY`.
    pub fn new(capability: C) -> EvalResult<Self> {
        let flags = capability.flags();
        if flags.has_combine() && !flags.has_delay() {
            return Err(EvalError::InvariantViolation {
                capability: C::NAME,
                reason: "a capability that implements combine must also implement delay",
            });
        }
        tracing::debug!(capability = C::NAME, ?flags, "evaluator created");
        Ok(Evaluator {
            inner: Rc::new(Inner { capability, flags }),
        })
    }

    pub fn capability(&self) -> &C {
        &self.inner.capability
    }

    pub fn flags(&self) -> CapabilityFlags {
        self.inner.flags
    }

    /// Parse and evaluate `source` with `scope` as the initial bindings.
    pub fn evaluate(&self, source: &str, scope: Scope) -> EvalResult<C::Wrapped> {
        let program = monadic_parse::parse(source)?;
        self.evaluate_program(&program, scope)
    }

    /// Evaluate an already parsed program.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(capability = C::NAME, units = program.len())
    )]
    pub fn evaluate_program(&self, program: &Program, scope: Scope) -> EvalResult<C::Wrapped> {
        let units = Rc::clone(program.units());
        let capability = &self.inner.capability;

        match (self.inner.flags.has_delay(), self.inner.flags.has_run()) {
            (false, false) => eval_sequence(&self.inner, units, 0, scope),
            (true, false) => capability.delay(self.thunk(units, scope)),
            (false, true) => {
                let raw = eval_sequence(&self.inner, units, 0, scope)?;
                capability.run(raw)
            }
            (true, true) => {
                let delayed = capability.delay(self.thunk(units, scope))?;
                capability.run(delayed)
            }
        }
    }

    fn thunk(&self, units: Units, scope: Scope) -> crate::capability::Thunk<C::Wrapped> {
        let inner = Rc::clone(&self.inner);
        Box::new(move || eval_sequence(&inner, units, 0, scope))
    }
}

/// Walk `units` from `index`, dispatching each marker.
fn eval_sequence<C: Capability>(
    inner: &Rc<Inner<C>>,
    units: Units,
    mut index: usize,
    mut scope: Scope,
) -> EvalResult<C::Wrapped> {
    let capability = &inner.capability;

    loop {
        let Some(unit) = units.get(index) else {
            return Err(EvalError::EmptySequence);
        };
        let marker = eval_unit(unit, &scope)?;
        let next = index + 1;
        let is_last = next == units.len();
        trace!(index, marker = marker.name(), is_last, "dispatch");

        match marker {
            MarkerResult::Let(name, value) => {
                ReservedName::check(name.as_str())?;
                scope.bind(name, value);
                index = next;
            }
            MarkerResult::Plain(_) if !is_last => index = next,
            MarkerResult::Plain(_) => return capability.zero(),
            MarkerResult::Bind(name, value) => {
                ReservedName::check(name.as_str())?;
                let wrapped = capability.lift(value)?;
                let k = bind_continuation(inner, units, next, scope, name);
                return capability.bind(wrapped, k);
            }
            MarkerResult::Do(value) => {
                let wrapped = capability.lift(value)?;
                let k = do_continuation(inner, units, next, scope);
                return capability.monad_do(wrapped, k);
            }
            MarkerResult::Unit(value) => {
                let first = capability.unit(value)?;
                if is_last {
                    return Ok(first);
                }
                return combine_with_rest(inner, first, units, next, scope);
            }
            MarkerResult::Unit2(value) => {
                let first = capability.unit2(capability.lift(value)?)?;
                if is_last {
                    return Ok(first);
                }
                return combine_with_rest(inner, first, units, next, scope);
            }
        }
    }
}

/// Continue at `index`, or produce `zero()` if nothing is left.
fn resume_at<C: Capability>(
    inner: &Rc<Inner<C>>,
    units: Units,
    index: usize,
    scope: Scope,
) -> EvalResult<C::Wrapped> {
    if index >= units.len() {
        return inner.capability.zero();
    }
    ensure_sufficient_stack(|| eval_sequence(inner, units, index, scope))
}

fn bind_continuation<C: Capability>(
    inner: &Rc<Inner<C>>,
    units: Units,
    index: usize,
    scope: Scope,
    name: Name,
) -> Continuation<C::Wrapped> {
    let inner = Rc::clone(inner);
    Rc::new(move |value: Value| {
        let scope = scope.extend(name.clone(), value);
        resume_at(&inner, Rc::clone(&units), index, scope)
    })
}

fn do_continuation<C: Capability>(
    inner: &Rc<Inner<C>>,
    units: Units,
    index: usize,
    scope: Scope,
) -> Resume<C::Wrapped> {
    let inner = Rc::clone(inner);
    Rc::new(move || resume_at(&inner, Rc::clone(&units), index, scope.clone()))
}

/// `unit` with more statements after it: `combine(first, delay(rest))`.
fn combine_with_rest<C: Capability>(
    inner: &Rc<Inner<C>>,
    first: C::Wrapped,
    units: Units,
    index: usize,
    scope: Scope,
) -> EvalResult<C::Wrapped> {
    let capability = &inner.capability;
    if !inner.flags.has_combine() {
        return Err(EvalError::CombineNotImplemented {
            capability: C::NAME,
        });
    }

    let rest = if inner.flags.has_delay() {
        let owner = Rc::clone(inner);
        capability.delay(Box::new(move || {
            ensure_sufficient_stack(|| eval_sequence(&owner, units, index, scope))
        }))?
    } else {
        ensure_sufficient_stack(|| eval_sequence(inner, units, index, scope))?
    };
    capability.combine(first, rest)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
