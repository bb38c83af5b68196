//! Host functions shared by the scenarios.

use monadic::{expect_args, init_tracing, EvalResult, Scope, Value};

/// `div_by(a, b)`: `Some(a / b)`, or `None` when `b` is zero.
pub fn div_by(args: &[Value]) -> EvalResult {
    let [a, b] = expect_args::<2>("div_by", args)?;
    let (a, b) = (a.as_int()?, b.as_int()?);
    Ok(if b == 0 {
        Value::None
    } else {
        Value::some(Value::Int(a / b))
    })
}

/// `safe_div(a, b)`: `Ok(a / b)`, or `Err("division by zero")`.
pub fn safe_div(args: &[Value]) -> EvalResult {
    let [a, b] = expect_args::<2>("safe_div", args)?;
    let (a, b) = (a.as_int()?, b.as_int()?);
    Ok(if b == 0 {
        Value::err(Value::string("division by zero"))
    } else {
        Value::ok(Value::Int(a / b))
    })
}

/// The prelude plus `div_by` and `safe_div`.
pub fn arithmetic_scope() -> Scope {
    init_tracing();
    Scope::prelude()
        .with("div_by", Value::native("div_by", div_by))
        .with("safe_div", Value::native("safe_div", safe_div))
}

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}
