use std::cell::RefCell;

use super::*;
use crate::capability::Thunk;
use crate::monads::{ListMonad, MaybeMonad, StateMonad};
use crate::ReservedName;
use pretty_assertions::assert_eq;

fn maybe(source: &str) -> EvalResult<Option<Value>> {
    Evaluator::new(MaybeMonad)
        .unwrap()
        .evaluate(source, Scope::prelude())
}

/// Records which optional operations the dispatcher calls, in order.
#[derive(Clone)]
struct Recording {
    flags: CapabilityFlags,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Recording {
    fn new(flags: CapabilityFlags) -> Self {
        Recording {
            flags,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn log(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }
}

impl Capability for Recording {
    type Wrapped = Value;

    const NAME: &'static str = "Recording";

    fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    fn lift(&self, value: Value) -> EvalResult<Value> {
        Ok(value)
    }

    fn unit(&self, value: Value) -> EvalResult<Value> {
        Ok(value)
    }

    fn combine(&self, first: Value, rest: Value) -> EvalResult<Value> {
        self.log.borrow_mut().push("combine");
        Ok(Value::list(vec![first, rest]))
    }

    fn delay(&self, thunk: Thunk<Value>) -> EvalResult<Value> {
        self.log.borrow_mut().push("delay");
        thunk()
    }

    fn run(&self, wrapped: Value) -> EvalResult<Value> {
        self.log.borrow_mut().push("run");
        Ok(Value::some(wrapped))
    }
}

#[test]
fn test_combine_without_delay_is_rejected() {
    let result = Evaluator::new(Recording::new(CapabilityFlags::COMBINE));
    assert!(matches!(
        result,
        Err(EvalError::InvariantViolation {
            capability: "Recording",
            ..
        })
    ));
}

#[test]
fn test_valid_flag_combinations_are_accepted() {
    for flags in [
        CapabilityFlags::empty(),
        CapabilityFlags::DELAY,
        CapabilityFlags::RUN,
        CapabilityFlags::COMBINE | CapabilityFlags::DELAY,
        CapabilityFlags::all(),
    ] {
        assert!(Evaluator::new(Recording::new(flags)).is_ok(), "{flags:?}");
    }
}

#[test]
fn test_top_level_wrapping() {
    let cases = [
        (CapabilityFlags::empty(), vec![], Value::Int(1)),
        (CapabilityFlags::DELAY, vec!["delay"], Value::Int(1)),
        (CapabilityFlags::RUN, vec!["run"], Value::some(Value::Int(1))),
        (
            CapabilityFlags::DELAY | CapabilityFlags::RUN,
            vec!["delay", "run"],
            Value::some(Value::Int(1)),
        ),
    ];

    for (flags, expected_log, expected) in cases {
        let capability = Recording::new(flags);
        let evaluator = Evaluator::new(capability.clone()).unwrap();
        let result = evaluator.evaluate("unit(1)", Scope::new()).unwrap();
        assert_eq!(result, expected);
        assert_eq!(capability.log(), expected_log);
    }
}

#[test]
fn test_unit_not_last_combines_with_delayed_rest() {
    let capability = Recording::new(CapabilityFlags::COMBINE | CapabilityFlags::DELAY);
    let evaluator = Evaluator::new(capability.clone()).unwrap();

    let result = evaluator
        .evaluate("unit(1); unit(2); unit(3)", Scope::new())
        .unwrap();

    assert_eq!(
        result,
        Value::list(vec![
            Value::Int(1),
            Value::list(vec![Value::Int(2), Value::Int(3)]),
        ])
    );
    assert_eq!(
        capability.log(),
        vec!["delay", "delay", "delay", "combine", "combine"]
    );
}

#[test]
fn test_unit_not_last_without_combine() {
    let evaluator = Evaluator::new(StateMonad).unwrap();
    let result = evaluator.evaluate("unit(1); unit(2)", Scope::new());
    assert!(matches!(
        result,
        Err(EvalError::CombineNotImplemented {
            capability: "StateMonad"
        })
    ));
}

#[test]
fn test_trailing_let_is_an_empty_sequence() {
    assert_eq!(maybe("let(x, 1)"), Err(EvalError::EmptySequence));
    assert_eq!(maybe("unit(1); let x = 2"), Err(EvalError::EmptySequence));
}

#[test]
fn test_plain_last_statement_yields_zero() {
    assert_eq!(maybe("let(x, 1); x + 1"), Ok(None));

    let evaluator = Evaluator::new(StateMonad).unwrap();
    assert!(matches!(
        evaluator.evaluate("1 + 1", Scope::new()),
        Err(EvalError::ZeroNotImplemented {
            capability: "StateMonad"
        })
    ));
}

#[test]
fn test_bind_last_runs_continuation_into_zero() {
    assert_eq!(maybe("bind(x, Some(1))"), Ok(None));
}

#[test]
fn test_tail_unit_ignores_earlier_lets() {
    assert_eq!(
        maybe("let(a, 1); let b = a + 1; 'ignored'; unit(b * 10)"),
        Ok(Some(Value::Int(20)))
    );
}

#[test]
fn test_unit2_lifts_its_argument() {
    assert_eq!(maybe("unit2(Some(4))"), Ok(Some(Value::Int(4))));
    assert_eq!(maybe("unit2(None)"), Ok(None));
    assert_eq!(
        maybe("unit2(4)"),
        Err(EvalError::UnexpectedValue {
            capability: "MaybeMonad",
            expected: "Option",
            got: "int",
        })
    );
}

#[test]
fn test_reserved_names_are_rejected() {
    assert_eq!(
        maybe("let(_result, 1); unit(1)"),
        Err(EvalError::ReservedName {
            name: ReservedName::Result
        })
    );
    assert_eq!(
        maybe("bind('_head', Some(1)); unit(1)"),
        Err(EvalError::ReservedName {
            name: ReservedName::Head
        })
    );
    assert_eq!(
        maybe("if (true) { let(_code, 1); unit(1) }"),
        Err(EvalError::ReservedName {
            name: ReservedName::Code
        })
    );
}

#[test]
fn test_each_continuation_call_gets_its_own_scope() {
    let evaluator = Evaluator::new(ListMonad).unwrap();
    let result = evaluator
        .evaluate(
            "bind(x, [1, 2, 3]); let(y, x * 10); unit(y)",
            Scope::new(),
        )
        .unwrap();
    assert_eq!(result, vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
}

#[test]
fn test_conditional_picks_first_true_branch() {
    let source = "let(x, 2);
        if (x == 1) { unit(10) }
        else if (x == 2) { let(y, 5); unit(y * 2 + 1) }
        else { unit(0) }";
    assert_eq!(maybe(source), Ok(Some(Value::Int(11))));
}

#[test]
fn test_conditional_else_branch() {
    assert_eq!(
        maybe("if (false) { unit(1) } else { unit2(Some(2)) }"),
        Ok(Some(Value::Int(2)))
    );
}

#[test]
fn test_conditional_without_match_is_plain_null() {
    assert_eq!(maybe("if (false) { unit(1) }"), Ok(None));
    assert_eq!(
        maybe("if (false) { unit(1) }; unit(2)"),
        Ok(Some(Value::Int(2)))
    );
}

#[test]
fn test_branch_lets_are_local() {
    assert_eq!(
        maybe("if (true) { let(y, 1); y }; unit(y)"),
        Err(EvalError::UndefinedVariable {
            name: "y".to_string()
        })
    );
}

#[test]
fn test_final_branch_let_binds_in_sequence() {
    assert_eq!(
        maybe("if (true) { let(z, 3) } else { let(z, 4) }; unit(z)"),
        Ok(Some(Value::Int(3)))
    );
}

#[test]
fn test_predicate_must_be_bool() {
    assert_eq!(
        maybe("if (1) { unit(1) }"),
        Err(EvalError::TypeMismatch {
            expected: "bool",
            got: "int",
        })
    );
}

#[test]
fn test_parse_errors_surface_before_evaluation() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let scope = Scope::prelude().with(
        "touch",
        Value::native("touch", move |_| {
            *counter.borrow_mut() += 1;
            Ok(Value::some(Value::Null))
        }),
    );

    let evaluator = Evaluator::new(MaybeMonad).unwrap();
    let result = evaluator.evaluate("do(touch()); unit(\"open", scope);
    assert!(matches!(result, Err(EvalError::Parse(_))));
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_evaluate_program_is_reusable() {
    let program = monadic_parse::parse("bind(x, input); unit(x + 1)").unwrap();
    let evaluator = Evaluator::new(MaybeMonad).unwrap();

    for n in 0..3 {
        let scope = Scope::new().with("input", Value::some(Value::Int(n)));
        assert_eq!(
            evaluator.evaluate_program(&program, scope),
            Ok(Some(Value::Int(n + 1)))
        );
    }
}
