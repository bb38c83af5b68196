//! Coroutines that can suspend between steps.
//!
//! A [`Coroutine`] is stepped by a driver outside the engine. Each step either
//! finishes with a value or pauses, handing back the coroutine that continues
//! from where it stopped.

use std::fmt;
use std::mem;
use std::rc::Rc;

use monadic_stack::ensure_sufficient_stack;

use crate::capability::{Capability, Continuation, Resume};
use crate::errors::unexpected_value;
use crate::value::expect_args;
use crate::{EvalResult, Scope, Value};

#[derive(Clone)]
pub enum Step {
    Done(Value),
    Paused(Coroutine),
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Done(value) => write!(f, "Done({value:?})"),
            Step::Paused(_) => f.write_str("Paused(<coroutine>)"),
        }
    }
}

#[derive(Clone)]
pub struct Coroutine(Rc<CoroutineNode>);

enum CoroutineNode {
    Done(Value),
    Lazy(Box<dyn Fn() -> EvalResult<Step>>),
    AndThen {
        first: Coroutine,
        k: Continuation<Coroutine>,
    },
}

impl CoroutineNode {
    fn take_first(&mut self) -> Option<Coroutine> {
        match mem::replace(self, CoroutineNode::Done(Value::Null)) {
            CoroutineNode::AndThen { first, .. } => Some(first),
            CoroutineNode::Done(_) | CoroutineNode::Lazy(_) => None,
        }
    }
}

impl Coroutine {
    pub fn from_fn(f: impl Fn() -> EvalResult<Step> + 'static) -> Self {
        Coroutine(Rc::new(CoroutineNode::Lazy(Box::new(f))))
    }

    /// A coroutine that finishes immediately with `value`.
    pub fn done(value: Value) -> Self {
        Coroutine(Rc::new(CoroutineNode::Done(value)))
    }

    /// Run until the next pause or the end.
    pub fn step(&self) -> EvalResult<Step> {
        ensure_sufficient_stack(|| match &*self.0 {
            CoroutineNode::Done(value) => Ok(Step::Done(value.clone())),
            CoroutineNode::Lazy(f) => f(),
            CoroutineNode::AndThen { first, k } => match first.step()? {
                Step::Done(value) => k(value)?.step(),
                Step::Paused(next) => Ok(Step::Paused(next.and_then(Rc::clone(k)))),
            },
        })
    }

    /// Step until done, ignoring pauses.
    pub fn run_to_completion(&self) -> EvalResult<Value> {
        let mut current = self.clone();
        loop {
            match current.step()? {
                Step::Done(value) => return Ok(value),
                Step::Paused(next) => current = next,
            }
        }
    }

    /// Run `self`, then feed its result to `k`. A pause in `self` surfaces as
    /// a pause of the combined coroutine.
    #[must_use]
    pub fn and_then(&self, k: Continuation<Coroutine>) -> Coroutine {
        Coroutine(Rc::new(CoroutineNode::AndThen {
            first: self.clone(),
            k,
        }))
    }

    pub fn ptr_eq(&self, other: &Coroutine) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Drop for Coroutine {
    // Left-nested `and_then` chains are unlinked iteratively.
    fn drop(&mut self) {
        let mut next = Rc::get_mut(&mut self.0).and_then(CoroutineNode::take_first);
        while let Some(mut c) = next {
            next = Rc::get_mut(&mut c.0).and_then(CoroutineNode::take_first);
        }
    }
}

impl fmt::Debug for Coroutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Coroutine(<fn>)")
    }
}

/// A coroutine that pauses once, then finishes with `value`.
pub fn pause(value: Value) -> Coroutine {
    Coroutine::from_fn(move || Ok(Step::Paused(Coroutine::done(value.clone()))))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PauseMonad;

impl PauseMonad {
    /// [`Scope::prelude`] plus the `pause(v)` native.
    pub fn prelude() -> Scope {
        Scope::prelude().with(
            "pause",
            Value::native("pause", |args| {
                let [value] = expect_args::<1>("pause", args)?;
                Ok(Value::Coroutine(pause(value.clone())))
            }),
        )
    }
}

impl Capability for PauseMonad {
    type Wrapped = Coroutine;

    const NAME: &'static str = "PauseMonad";

    fn lift(&self, value: Value) -> EvalResult<Coroutine> {
        match value {
            Value::Coroutine(c) => Ok(c),
            other => Err(unexpected_value(Self::NAME, "Coroutine", &other)),
        }
    }

    fn unit(&self, value: Value) -> EvalResult<Coroutine> {
        Ok(Coroutine::done(value))
    }

    fn bind(&self, wrapped: Coroutine, k: Continuation<Coroutine>) -> EvalResult<Coroutine> {
        Ok(wrapped.and_then(k))
    }

    /// Same as `bind`, discarding the value.
    fn monad_do(&self, wrapped: Coroutine, k: Resume<Coroutine>) -> EvalResult<Coroutine> {
        Ok(wrapped.and_then(Rc::new(move |_: Value| k())))
    }
}
