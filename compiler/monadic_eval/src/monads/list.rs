use crate::capability::{Capability, CapabilityFlags, Continuation, Resume};
use crate::errors::unexpected_value;
use crate::{EvalResult, Value};

/// Nondeterminism: `bind` runs the rest of the sequence once per element
/// and concatenates the results in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListMonad;

impl Capability for ListMonad {
    type Wrapped = Vec<Value>;

    const NAME: &'static str = "ListMonad";

    fn flags(&self) -> CapabilityFlags {
        CapabilityFlags::COMBINE | CapabilityFlags::DELAY
    }

    fn lift(&self, value: Value) -> EvalResult<Vec<Value>> {
        match value {
            Value::List(items) => Ok(items.as_ref().clone()),
            other => Err(unexpected_value(Self::NAME, "list", &other)),
        }
    }

    fn unit(&self, value: Value) -> EvalResult<Vec<Value>> {
        Ok(vec![value])
    }

    fn bind(&self, wrapped: Vec<Value>, k: Continuation<Vec<Value>>) -> EvalResult<Vec<Value>> {
        let mut out = Vec::new();
        for item in wrapped {
            out.extend(k(item)?);
        }
        Ok(out)
    }

    fn monad_do(&self, wrapped: Vec<Value>, k: Resume<Vec<Value>>) -> EvalResult<Vec<Value>> {
        let mut out = Vec::new();
        for _ in &wrapped {
            out.extend(k()?);
        }
        Ok(out)
    }

    fn zero(&self) -> EvalResult<Vec<Value>> {
        Ok(Vec::new())
    }

    fn combine(&self, mut first: Vec<Value>, rest: Vec<Value>) -> EvalResult<Vec<Value>> {
        first.extend(rest);
        Ok(first)
    }
}
