use crate::capability::{Capability, CapabilityFlags, Continuation, Resume};
use crate::errors::{unexpected_value, unsupported_combine};
use crate::operators::add_numbers;
use crate::{EvalResult, Value};

/// Optional values: a `None` anywhere short-circuits the rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaybeMonad;

impl Capability for MaybeMonad {
    type Wrapped = Option<Value>;

    const NAME: &'static str = "MaybeMonad";

    fn flags(&self) -> CapabilityFlags {
        CapabilityFlags::COMBINE | CapabilityFlags::DELAY
    }

    fn lift(&self, value: Value) -> EvalResult<Option<Value>> {
        match value {
            Value::Some(v) => Ok(Some(v.as_ref().clone())),
            Value::None => Ok(None),
            other => Err(unexpected_value(Self::NAME, "Option", &other)),
        }
    }

    fn unit(&self, value: Value) -> EvalResult<Option<Value>> {
        Ok(Some(value))
    }

    fn bind(&self, wrapped: Option<Value>, k: Continuation<Option<Value>>) -> EvalResult<Option<Value>> {
        match wrapped {
            Some(value) => k(value),
            None => Ok(None),
        }
    }

    fn monad_do(&self, wrapped: Option<Value>, k: Resume<Option<Value>>) -> EvalResult<Option<Value>> {
        match wrapped {
            Some(_) => k(),
            None => Ok(None),
        }
    }

    fn zero(&self) -> EvalResult<Option<Value>> {
        Ok(None)
    }

    /// Present values add; a lone present value wins over `None`.
    fn combine(&self, first: Option<Value>, rest: Option<Value>) -> EvalResult<Option<Value>> {
        match (first, rest) {
            (Some(a), Some(b)) => match add_numbers(&a, &b) {
                Some(sum) => sum.map(Some),
                None => Err(unsupported_combine(Self::NAME, &a, &b)),
            },
            (Some(a), None) => Ok(Some(a)),
            (None, rest) => Ok(rest),
        }
    }
}
