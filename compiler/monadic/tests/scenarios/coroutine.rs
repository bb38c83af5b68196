use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use monadic::{expect_args, Coroutine, EvalResult, Evaluator, PauseMonad, Step, Value};
use pretty_assertions::assert_eq;

type Output = Rc<RefCell<String>>;

const PROCESS_SOURCE: &str = "
    do(pause(0));
    if (step == 0) {
        get_last_process_step(name);
        unit(name)
    } else {
        get_process_step(name, step);
        unit2(get_process(name, step - 1))
    }
";

/// A process that reports each remaining step, pausing before each report.
fn process(
    evaluator: &Evaluator<PauseMonad>,
    out: &Output,
    name: &str,
    step: i64,
) -> EvalResult<Coroutine> {
    let owner = evaluator.clone();
    let sink = Rc::clone(out);
    let get_process = Value::native("get_process", move |args| {
        let [name, step] = expect_args::<2>("get_process", args)?;
        let coroutine = process(&owner, &sink, name.as_str()?, step.as_int()?)?;
        Ok(Value::Coroutine(coroutine))
    });

    let sink = Rc::clone(out);
    let get_process_step = Value::native("get_process_step", move |args| {
        let [name, step] = expect_args::<2>("get_process_step", args)?;
        let _ = writeln!(sink.borrow_mut(), "{name}: {step} step(s) remaining.");
        Ok(Value::Null)
    });

    let sink = Rc::clone(out);
    let get_last_process_step = Value::native("get_last_process_step", move |args| {
        let [name] = expect_args::<1>("get_last_process_step", args)?;
        let _ = writeln!(sink.borrow_mut(), "{name} finished.");
        Ok(Value::Null)
    });

    let scope = PauseMonad::prelude()
        .with("get_process", get_process)
        .with("get_process_step", get_process_step)
        .with("get_last_process_step", get_last_process_step)
        .with("name", name)
        .with("step", step);
    evaluator.evaluate(PROCESS_SOURCE, scope)
}

/// Step both processes in lockstep until one of them finishes.
fn race(mut p1: Coroutine, mut p2: Coroutine, out: &Output) -> EvalResult<()> {
    loop {
        let first = p1.step()?;
        let second = p2.step()?;
        match (first, second) {
            (Step::Done(_), _) => {
                let _ = writeln!(out.borrow_mut(), "Process 1 finished first.");
                return Ok(());
            }
            (_, Step::Done(_)) => {
                let _ = writeln!(out.borrow_mut(), "Process 2 finished first.");
                return Ok(());
            }
            (Step::Paused(next1), Step::Paused(next2)) => {
                p1 = next1;
                p2 = next2;
            }
        }
    }
}

#[test]
fn race_two_processes() {
    let evaluator = Evaluator::new(PauseMonad).unwrap();
    let out: Output = Rc::default();

    let p1 = process(&evaluator, &out, "Process 1", 1).unwrap();
    let p2 = process(&evaluator, &out, "Process 2", 2).unwrap();
    race(p1, p2, &out).unwrap();

    assert_eq!(
        out.borrow().as_str(),
        "Process 1: 1 step(s) remaining.\n\
         Process 2: 2 step(s) remaining.\n\
         Process 1 finished.\n\
         Process 2: 1 step(s) remaining.\n\
         Process 1 finished first.\n"
    );
}

#[test]
fn building_a_process_runs_nothing() {
    let evaluator = Evaluator::new(PauseMonad).unwrap();
    let out: Output = Rc::default();

    let p = process(&evaluator, &out, "Idle", 3).unwrap();
    assert!(out.borrow().is_empty());

    assert!(matches!(p.step().unwrap(), Step::Paused(_)));
    assert!(out.borrow().is_empty());
}

#[test]
fn process_runs_to_completion() {
    let evaluator = Evaluator::new(PauseMonad).unwrap();
    let out: Output = Rc::default();

    let p = process(&evaluator, &out, "Solo", 2).unwrap();
    assert_eq!(p.run_to_completion(), Ok(Value::string("Solo")));
    assert_eq!(
        out.borrow().as_str(),
        "Solo: 2 step(s) remaining.\n\
         Solo: 1 step(s) remaining.\n\
         Solo finished.\n"
    );
}
