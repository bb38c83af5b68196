//! Stateful computations: `state -> (state, value)` functions threaded
//! through a sequence.

use std::fmt;
use std::mem;
use std::rc::Rc;

use monadic_stack::ensure_sufficient_stack;

use crate::capability::{Capability, Continuation, Resume};
use crate::errors::unexpected_value;
use crate::value::expect_args;
use crate::{EvalResult, Scope, Value};

/// Output of running a stateful function.
#[derive(Clone, Debug, PartialEq)]
pub struct StateResult {
    pub state: Value,
    pub value: Value,
}

/// A stateful function.
#[derive(Clone)]
pub struct StateFn(Rc<StateNode>);

enum StateNode {
    Pure(Value),
    Step(Box<dyn Fn(Value) -> EvalResult<StateResult>>),
    Bind {
        first: StateFn,
        k: Continuation<StateFn>,
    },
    Then {
        first: StateFn,
        k: Resume<StateFn>,
    },
}

impl StateNode {
    fn take_first(&mut self) -> Option<StateFn> {
        match mem::replace(self, StateNode::Pure(Value::Null)) {
            StateNode::Bind { first, .. } | StateNode::Then { first, .. } => Some(first),
            StateNode::Pure(_) | StateNode::Step(_) => None,
        }
    }
}

impl StateFn {
    pub fn new(f: impl Fn(Value) -> EvalResult<StateResult> + 'static) -> Self {
        StateFn(Rc::new(StateNode::Step(Box::new(f))))
    }

    /// Leaves the state alone and yields `value`.
    pub fn pure(value: Value) -> Self {
        StateFn(Rc::new(StateNode::Pure(value)))
    }

    /// Run `self`, then the function `k` builds from its value, threading the
    /// state through both.
    #[must_use]
    pub fn bind(&self, k: Continuation<StateFn>) -> Self {
        StateFn(Rc::new(StateNode::Bind {
            first: self.clone(),
            k,
        }))
    }

    /// Like [`StateFn::bind`], discarding the first value.
    #[must_use]
    pub fn then(&self, k: Resume<StateFn>) -> Self {
        StateFn(Rc::new(StateNode::Then {
            first: self.clone(),
            k,
        }))
    }

    /// Run with `state` as the initial state.
    pub fn run(&self, state: Value) -> EvalResult<StateResult> {
        ensure_sufficient_stack(|| match &*self.0 {
            StateNode::Pure(value) => Ok(StateResult {
                state,
                value: value.clone(),
            }),
            StateNode::Step(f) => f(state),
            StateNode::Bind { first, k } => {
                let first = first.run(state)?;
                k(first.value)?.run(first.state)
            }
            StateNode::Then { first, k } => {
                let first = first.run(state)?;
                k()?.run(first.state)
            }
        })
    }

    pub fn ptr_eq(&self, other: &StateFn) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Drop for StateFn {
    // Left-nested chains are unlinked iteratively.
    fn drop(&mut self) {
        let mut next = Rc::get_mut(&mut self.0).and_then(StateNode::take_first);
        while let Some(mut f) = next {
            next = Rc::get_mut(&mut f.0).and_then(StateNode::take_first);
        }
    }
}

impl fmt::Debug for StateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateFn(<fn>)")
    }
}

/// Returns the current state as both the new state and the value.
pub fn get_state() -> StateFn {
    StateFn::new(|state| {
        Ok(StateResult {
            state: state.clone(),
            value: state,
        })
    })
}

/// Replaces the state with `new_state`; the value is `null`.
pub fn set_state(new_state: Value) -> StateFn {
    StateFn::new(move |_| {
        Ok(StateResult {
            state: new_state.clone(),
            value: Value::Null,
        })
    })
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StateMonad;

impl StateMonad {
    /// [`Scope::prelude`] plus the `get_state()` and `set_state(s)` natives.
    pub fn prelude() -> Scope {
        Scope::prelude()
            .with(
                "get_state",
                Value::native("get_state", |args| {
                    expect_args::<0>("get_state", args)?;
                    Ok(Value::State(get_state()))
                }),
            )
            .with(
                "set_state",
                Value::native("set_state", |args| {
                    let [state] = expect_args::<1>("set_state", args)?;
                    Ok(Value::State(set_state(state.clone())))
                }),
            )
    }
}

impl Capability for StateMonad {
    type Wrapped = StateFn;

    const NAME: &'static str = "StateMonad";

    fn lift(&self, value: Value) -> EvalResult<StateFn> {
        match value {
            Value::State(f) => Ok(f),
            other => Err(unexpected_value(Self::NAME, "State", &other)),
        }
    }

    fn unit(&self, value: Value) -> EvalResult<StateFn> {
        Ok(StateFn::pure(value))
    }

    /// The first step's output state is the input state of the rest.
    fn bind(&self, wrapped: StateFn, k: Continuation<StateFn>) -> EvalResult<StateFn> {
        Ok(wrapped.bind(k))
    }

    fn monad_do(&self, wrapped: StateFn, k: Resume<StateFn>) -> EvalResult<StateFn> {
        Ok(wrapped.then(k))
    }
}
