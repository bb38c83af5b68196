use monadic::{Evaluator, StateMonad, StateResult, Value};
use pretty_assertions::assert_eq;

#[test]
fn state_threads_between_steps() {
    let evaluator = Evaluator::new(StateMonad).unwrap();
    let program = evaluator
        .evaluate(
            "bind(x, get_state());
             let x = x + 1;
             do(set_state(x));
             let x = x + 1;
             unit(x)",
            StateMonad::prelude(),
        )
        .unwrap();

    assert_eq!(
        program.run(Value::Int(1)).unwrap(),
        StateResult {
            state: Value::Int(2),
            value: Value::Int(3),
        }
    );
}

#[test]
fn state_sees_updates_from_earlier_steps() {
    let evaluator = Evaluator::new(StateMonad).unwrap();
    let program = evaluator
        .evaluate(
            "do(set_state([1]));
             bind(xs, get_state());
             monad_do(set_state(xs + [2]));
             bind(ys, get_state());
             unit(ys + [3])",
            StateMonad::prelude(),
        )
        .unwrap();

    let result = program.run(Value::Null).unwrap();
    assert_eq!(
        result.state,
        Value::list(vec![Value::Int(1), Value::Int(2)])
    );
    assert_eq!(
        result.value,
        Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn state_program_is_reusable() {
    let evaluator = Evaluator::new(StateMonad).unwrap();
    let increment = evaluator
        .evaluate(
            "bind(n, get_state()); do(set_state(n + 1)); unit(n)",
            StateMonad::prelude(),
        )
        .unwrap();

    for start in [0, 41, -3] {
        let result = increment.run(Value::Int(start)).unwrap();
        assert_eq!(result.state, Value::Int(start + 1));
        assert_eq!(result.value, Value::Int(start));
    }
}
