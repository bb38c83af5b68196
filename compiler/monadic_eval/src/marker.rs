//! Evaluating one statement unit into the marker the dispatcher acts on.

use monadic_ir::{Name, StatementKind, StatementUnit};

use crate::interpreter::eval_expr;
use crate::scope::ReservedName;
use crate::{EvalError, EvalResult, Scope, Value};

/// The role a unit plays in the sequence, with its evaluated payload.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerResult {
    Let(Name, Value),
    Unit(Value),
    Unit2(Value),
    Bind(Name, Value),
    Do(Value),
    Plain(Value),
}

impl MarkerResult {
    pub fn name(&self) -> &'static str {
        match self {
            MarkerResult::Let(..) => "let",
            MarkerResult::Unit(_) => "unit",
            MarkerResult::Unit2(_) => "unit2",
            MarkerResult::Bind(..) => "bind",
            MarkerResult::Do(_) => "do",
            MarkerResult::Plain(_) => "plain",
        }
    }
}

/// Evaluate `unit` against `scope`.
///
/// A conditional group runs the body of its first branch whose predicate is
/// `true` (or its `else` body) and yields that body's final marker. With no
/// matching branch and no `else`, it yields `Plain(Null)`.
pub fn eval_unit(unit: &StatementUnit, scope: &Scope) -> EvalResult<MarkerResult> {
    match unit {
        StatementUnit::Statement(statement) => {
            let marker = match &statement.kind {
                StatementKind::Let { name, value } => {
                    MarkerResult::Let(name.clone(), eval_expr(value, scope)?)
                }
                StatementKind::Unit(value) => MarkerResult::Unit(eval_expr(value, scope)?),
                StatementKind::Unit2(value) => MarkerResult::Unit2(eval_expr(value, scope)?),
                StatementKind::Bind { name, value } => {
                    MarkerResult::Bind(name.clone(), eval_expr(value, scope)?)
                }
                StatementKind::Do(value) => MarkerResult::Do(eval_expr(value, scope)?),
                StatementKind::Expr(value) => MarkerResult::Plain(eval_expr(value, scope)?),
            };
            Ok(marker)
        }
        StatementUnit::Conditional(group) => {
            for branch in &group.branches {
                if eval_expr(&branch.predicate, scope)?.as_bool()? {
                    return eval_body(&branch.body, scope);
                }
            }
            match &group.otherwise {
                Some(body) => eval_body(body, scope),
                None => Ok(MarkerResult::Plain(Value::Null)),
            }
        }
    }
}

/// Run a branch body. `let`s before the last unit are visible only inside
/// the body; the last unit's marker is returned to the dispatcher.
fn eval_body(body: &[StatementUnit], scope: &Scope) -> EvalResult<MarkerResult> {
    let Some((last, prefix)) = body.split_last() else {
        return Ok(MarkerResult::Plain(Value::Null));
    };

    let mut local = scope.clone();
    for unit in prefix {
        match eval_unit(unit, &local)? {
            MarkerResult::Let(name, value) => {
                ReservedName::check(name.as_str())?;
                local.bind(name, value);
            }
            MarkerResult::Plain(_) => {}
            other => {
                return Err(EvalError::MisplacedMarker {
                    marker: other.name(),
                })
            }
        }
    }
    eval_unit(last, &local)
}
