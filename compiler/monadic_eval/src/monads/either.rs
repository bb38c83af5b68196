use crate::capability::{Capability, CapabilityFlags, Continuation, Resume};
use crate::errors::{unexpected_value, unsupported_combine};
use crate::operators::add_numbers;
use crate::{EvalResult, Value};

/// Success or failure: an `Err` short-circuits the rest and is returned
/// unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct EitherMonad;

type Either = Result<Value, Value>;

fn add(a: &Value, b: &Value) -> EvalResult {
    match add_numbers(a, b) {
        Some(sum) => sum,
        None => Err(unsupported_combine(EitherMonad::NAME, a, b)),
    }
}

impl Capability for EitherMonad {
    type Wrapped = Either;

    const NAME: &'static str = "EitherMonad";

    fn flags(&self) -> CapabilityFlags {
        CapabilityFlags::COMBINE | CapabilityFlags::DELAY
    }

    fn lift(&self, value: Value) -> EvalResult<Either> {
        match value {
            Value::Ok(v) => Ok(Ok(v.as_ref().clone())),
            Value::Err(e) => Ok(Err(e.as_ref().clone())),
            other => Err(unexpected_value(Self::NAME, "Result", &other)),
        }
    }

    fn unit(&self, value: Value) -> EvalResult<Either> {
        Ok(Ok(value))
    }

    fn bind(&self, wrapped: Either, k: Continuation<Either>) -> EvalResult<Either> {
        match wrapped {
            Ok(value) => k(value),
            Err(error) => Ok(Err(error)),
        }
    }

    fn monad_do(&self, wrapped: Either, k: Resume<Either>) -> EvalResult<Either> {
        match wrapped {
            Ok(_) => k(),
            Err(error) => Ok(Err(error)),
        }
    }

    fn zero(&self) -> EvalResult<Either> {
        Ok(Err(Value::Int(0)))
    }

    /// Failures win over successes; two of a kind add their payloads.
    fn combine(&self, first: Either, rest: Either) -> EvalResult<Either> {
        match (first, rest) {
            (Ok(a), Ok(b)) => add(&a, &b).map(Ok),
            (Err(a), Err(b)) => add(&a, &b).map(Err),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Ok(Err(e)),
        }
    }
}
