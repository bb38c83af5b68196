use std::cell::Cell;
use std::rc::Rc;

use monadic::{counter, EvalError, EvalResult, Evaluator, Seq, SeqMonad, SeqNode, Value};
use pretty_assertions::assert_eq;

use crate::common::ints;

/// The Fibonacci numbers from `(a, b)` on. `forced` counts nodes computed.
fn fibonacci(
    evaluator: &Evaluator<SeqMonad>,
    a: i64,
    b: i64,
    forced: &Rc<Cell<usize>>,
) -> EvalResult<Seq> {
    let owner = evaluator.clone();
    let forced = Rc::clone(forced);
    let rec = Seq::from_fn(move || {
        forced.set(forced.get() + 1);
        let next = a.checked_add(b).ok_or(EvalError::IntegerOverflow {
            operation: "fibonacci",
        })?;
        Ok(Some(SeqNode {
            item: Value::Int(a),
            next: fibonacci(&owner, b, next, &forced)?,
        }))
    });

    evaluator.evaluate("unit2(rec)", SeqMonad::prelude().with("rec", rec))
}

#[test]
fn fibonacci_prefix_forces_only_what_is_taken() {
    let evaluator = Evaluator::new(SeqMonad).unwrap();
    let forced = Rc::new(Cell::new(0));

    let fib = fibonacci(&evaluator, 1, 1, &forced).unwrap();
    assert_eq!(forced.get(), 0);

    let first_ten = fib.take(10).to_vec().unwrap();
    assert_eq!(first_ten, ints(&[1, 1, 2, 3, 5, 8, 13, 21, 34, 55]));
    assert_eq!(forced.get(), 10);
}

#[test]
fn counters_combine_lazily() {
    let evaluator = Evaluator::new(SeqMonad).unwrap();
    let scope = SeqMonad::prelude()
        .with("low", counter(&evaluator, 0, 2).unwrap())
        .with("high", counter(&evaluator, 10, 11).unwrap());

    let joined = evaluator
        .evaluate("unit2(low); unit(5); unit2(high)", scope)
        .unwrap();
    assert_eq!(joined.to_vec().unwrap(), ints(&[0, 1, 2, 5, 10, 11]));
}

#[test]
fn counter_edges() {
    let evaluator = Evaluator::new(SeqMonad).unwrap();
    assert_eq!(counter(&evaluator, 7, 7).unwrap().to_vec().unwrap(), ints(&[7]));
    assert!(counter(&evaluator, 1, 0).unwrap().force().unwrap().is_none());
}

#[test]
fn infinite_counter_take() {
    let evaluator = Evaluator::new(SeqMonad).unwrap();
    let naturals = counter(&evaluator, 0, i64::MAX).unwrap();
    let items: Vec<Value> = naturals.iter().take(4).collect::<EvalResult<_>>().unwrap();
    assert_eq!(items, ints(&[0, 1, 2, 3]));
}
