use std::fmt::Write as _;

use monadic::{
    Capability, CapabilityFlags, EitherMonad, EvalError, EvalResult, Evaluator, ListMonad,
    MaybeMonad, PauseMonad, ReservedName, Scope, SeqMonad, StateMonad, Step, Value,
};
use pretty_assertions::assert_eq;

use crate::common::arithmetic_scope;

/// Declares `combine` but not `delay`.
struct Eager;

impl Capability for Eager {
    type Wrapped = Vec<Value>;

    const NAME: &'static str = "Eager";

    fn flags(&self) -> CapabilityFlags {
        CapabilityFlags::COMBINE
    }

    fn lift(&self, value: Value) -> EvalResult<Vec<Value>> {
        Ok(vec![value])
    }

    fn unit(&self, value: Value) -> EvalResult<Vec<Value>> {
        Ok(vec![value])
    }
}

#[test]
fn combine_requires_delay() {
    let error = Evaluator::new(Eager).err().unwrap();
    assert!(matches!(
        error,
        EvalError::InvariantViolation {
            capability: "Eager",
            ..
        }
    ));
    assert_eq!(
        error.to_string(),
        "Eager violates the capability contract: \
         a capability that implements combine must also implement delay"
    );
}

const TAIL_UNIT: &str = "let(a, 1); let(b, a + 1); 'noise'; unit(b)";

#[test]
fn tail_unit_matches_direct_unit() {
    let two = Value::Int(2);

    assert_eq!(
        Evaluator::new(ListMonad).unwrap().evaluate(TAIL_UNIT, Scope::new()),
        ListMonad.unit(two.clone())
    );
    assert_eq!(
        Evaluator::new(MaybeMonad).unwrap().evaluate(TAIL_UNIT, Scope::new()),
        MaybeMonad.unit(two.clone())
    );
    assert_eq!(
        Evaluator::new(EitherMonad).unwrap().evaluate(TAIL_UNIT, Scope::new()),
        EitherMonad.unit(two.clone())
    );

    let state = Evaluator::new(StateMonad)
        .unwrap()
        .evaluate(TAIL_UNIT, Scope::new())
        .unwrap();
    assert_eq!(
        state.run(Value::string("s")).unwrap(),
        StateMonad.unit(two.clone()).unwrap().run(Value::string("s")).unwrap()
    );

    let seq = Evaluator::new(SeqMonad)
        .unwrap()
        .evaluate(TAIL_UNIT, Scope::new())
        .unwrap();
    assert_eq!(seq.to_vec().unwrap(), vec![two.clone()]);

    let coroutine = Evaluator::new(PauseMonad)
        .unwrap()
        .evaluate(TAIL_UNIT, Scope::new())
        .unwrap();
    assert!(matches!(coroutine.step().unwrap(), Step::Done(v) if v == two));
}

#[test]
fn reserved_names_leave_scope_untouched() {
    let scope = arithmetic_scope().with("x", 1i64);
    let before = scope.len();
    let evaluator = Evaluator::new(MaybeMonad).unwrap();

    for name in ReservedName::ALL {
        let source = format!("let(y, 2); let({}, 3); unit(y)", name.as_str());
        assert_eq!(
            evaluator.evaluate(&source, scope.clone()),
            Err(EvalError::ReservedName { name })
        );
    }

    assert_eq!(
        evaluator.evaluate("bind(_context, Some(1)); unit(1)", scope.clone()),
        Err(EvalError::ReservedName {
            name: ReservedName::Context
        })
    );

    assert_eq!(scope.len(), before);
    assert!(!scope.contains("y"));
    for name in ReservedName::ALL {
        assert!(!scope.contains(name.as_str()));
    }
}

#[test]
fn parse_errors_report_positions() {
    let evaluator = Evaluator::new(MaybeMonad).unwrap();
    let Err(EvalError::Parse(error)) = evaluator.evaluate("unit(1); f(2; 3)", Scope::new())
    else {
        panic!("expected a parse error");
    };
    assert_eq!(error.position(), 12);
}

fn bind_chain(len: usize, wrap: impl Fn(&str) -> String) -> String {
    let mut source = format!("bind(x0, {});", wrap("0"));
    for i in 1..len {
        let _ = write!(source, " bind(x{i}, {});", wrap(&format!("x{} + 1", i - 1)));
    }
    let _ = write!(source, " unit(x{})", len - 1);
    source
}

const DEEP: usize = 20_000;

#[test]
fn deep_bind_chain_maybe() {
    let evaluator = Evaluator::new(MaybeMonad).unwrap();
    let source = bind_chain(DEEP, |e| format!("Some({e})"));
    let result = evaluator.evaluate(&source, Scope::prelude());
    assert_eq!(result, Ok(Some(Value::Int(19_999))));
}

#[test]
fn deep_bind_chain_either() {
    let evaluator = Evaluator::new(EitherMonad).unwrap();
    let source = bind_chain(DEEP, |e| format!("Ok({e})"));
    let result = evaluator.evaluate(&source, Scope::prelude());
    assert_eq!(result, Ok(Ok(Value::Int(19_999))));
}

#[test]
fn deep_bind_chain_list() {
    let evaluator = Evaluator::new(ListMonad).unwrap();
    let source = bind_chain(DEEP, |e| format!("[{e}]"));
    let result = evaluator.evaluate(&source, Scope::new());
    assert_eq!(result, Ok(vec![Value::Int(19_999)]));
}

#[test]
fn deep_combine_chain_seq() {
    let mut source = String::new();
    for i in 0..DEEP {
        let _ = write!(source, "unit({i}); ");
    }
    source.push_str("unit(-1)");

    let evaluator = Evaluator::new(SeqMonad).unwrap();
    let seq = evaluator.evaluate(&source, SeqMonad::prelude()).unwrap();
    let items = seq.to_vec().unwrap();
    assert_eq!(items.len(), DEEP + 1);
    assert_eq!(items.first(), Some(&Value::Int(0)));
    assert_eq!(items.last(), Some(&Value::Int(-1)));
    drop(seq);
}

#[test]
fn deep_state_chain() {
    let mut source = String::new();
    for _ in 0..DEEP {
        source.push_str("bind(n, get_state()); do(set_state(n + 1)); ");
    }
    source.push_str("bind(n, get_state()); unit(n)");

    let evaluator = Evaluator::new(StateMonad).unwrap();
    let program = evaluator.evaluate(&source, StateMonad::prelude()).unwrap();
    let result = program.run(Value::Int(0)).unwrap();
    assert_eq!(result.state, Value::Int(20_000));
    assert_eq!(result.value, Value::Int(20_000));
    drop(program);
}
