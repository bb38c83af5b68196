use monadic::{EitherMonad, EvalError, Evaluator, ListMonad, MaybeMonad, Scope, Value};
use pretty_assertions::assert_eq;

use crate::common::{arithmetic_scope, ints};

#[test]
fn list_cross_product() {
    let evaluator = Evaluator::new(ListMonad).unwrap();
    let products = evaluator
        .evaluate(
            "bind(x, [1, 2, 3]);
             bind(y, [4, 5, 6]);
             unit(x * y)",
            Scope::new(),
        )
        .unwrap();
    assert_eq!(products, ints(&[4, 5, 6, 8, 10, 12, 12, 15, 18]));
}

#[test]
fn list_filter_with_conditional() {
    let evaluator = Evaluator::new(ListMonad).unwrap();
    let evens = evaluator
        .evaluate(
            "bind(x, [1, 2, 3, 4, 5, 6]);
             if (x % 2 == 0) { unit(x) } else { [] }",
            Scope::new(),
        )
        .unwrap();
    assert_eq!(evens, ints(&[2, 4, 6]));
}

#[test]
fn list_pythagorean_triples() {
    let evaluator = Evaluator::new(ListMonad).unwrap();
    let scope = Scope::new().with(
        "range",
        Value::native("range", |args| {
            let [from, to] = monadic::expect_args::<2>("range", args)?;
            Ok(Value::list(
                (from.as_int()?..=to.as_int()?).map(Value::Int).collect(),
            ))
        }),
    );
    let triples = evaluator
        .evaluate(
            "bind(a, range(1, 13));
             bind(b, range(a, 13));
             bind(c, range(b, 13));
             if (a * a + b * b == c * c) { unit([a, b, c]) }",
            scope,
        )
        .unwrap();
    assert_eq!(
        triples,
        vec![
            Value::list(ints(&[3, 4, 5])),
            Value::list(ints(&[5, 12, 13])),
            Value::list(ints(&[6, 8, 10])),
        ]
    );
}

#[test]
fn maybe_present_values() {
    let evaluator = Evaluator::new(MaybeMonad).unwrap();
    let result = evaluator.evaluate(
        "bind(a, div_by(100, 2));
         bind(b, div_by(a, 5));
         unit(b)",
        arithmetic_scope(),
    );
    assert_eq!(result, Ok(Some(Value::Int(10))));
}

#[test]
fn maybe_short_circuits_on_none() {
    let evaluator = Evaluator::new(MaybeMonad).unwrap();
    let result = evaluator.evaluate(
        "bind(a, div_by(100, 0));
         bind(b, div_by(a, missing));
         unit(b)",
        arithmetic_scope(),
    );
    // `missing` is never looked up.
    assert_eq!(result, Ok(None));
}

#[test]
fn either_unwraps_ok() {
    let evaluator = Evaluator::new(EitherMonad).unwrap();
    let result = evaluator.evaluate(
        "bind(a, safe_div(100, 4));
         let b = a - 5;
         bind(c, safe_div(b, 2));
         unit(c)",
        arithmetic_scope(),
    );
    assert_eq!(result, Ok(Ok(Value::Int(10))));
}

#[test]
fn either_short_circuits_on_err() {
    let evaluator = Evaluator::new(EitherMonad).unwrap();
    let result = evaluator.evaluate(
        "bind(a, safe_div(100, 0));
         bind(c, safe_div(a, 2));
         unit(c)",
        arithmetic_scope(),
    );
    assert_eq!(result, Ok(Err(Value::string("division by zero"))));
}

#[test]
fn either_combine_keeps_the_failure() {
    let evaluator = Evaluator::new(EitherMonad).unwrap();
    let result = evaluator.evaluate(
        "unit(1); unit2(safe_div(1, 0)); unit(3)",
        arithmetic_scope(),
    );
    assert_eq!(result, Ok(Err(Value::string("division by zero"))));
}

#[test]
fn native_errors_propagate() {
    let evaluator = Evaluator::new(MaybeMonad).unwrap();
    let result = evaluator.evaluate("bind(a, div_by(1)); unit(a)", arithmetic_scope());
    assert_eq!(
        result,
        Err(EvalError::ArityMismatch {
            function: "div_by".to_string(),
            expected: 2,
            got: 1,
        })
    );
}
