//! Binary and unary operators of the embedded language.
//!
//! Integer arithmetic is checked: overflow is an error, not a wrap. Mixing
//! `int` and `float` promotes to `float`. `+` with a string on either side
//! concatenates display forms.

use std::cmp::Ordering;

use monadic_ir::{BinaryOp, UnaryOp};

use crate::errors::{integer_overflow, invalid_operands, type_mismatch};
use crate::{EvalError, EvalResult, Value};

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `left op right` for already evaluated operands.
///
/// `&&` and `||` are short-circuited by the interpreter before reaching here;
/// this only sees them when both sides are already values.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
        _ => {}
    }

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        #[expect(
            clippy::cast_precision_loss,
            reason = "mixed arithmetic promotes to float"
        )]
        (Value::Int(a), Value::Float(b)) => eval_float_binary(*a as f64, *b, op),
        #[expect(
            clippy::cast_precision_loss,
            reason = "mixed arithmetic promotes to float"
        )]
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, *b as f64, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Str(_), _) | (_, Value::Str(_)) if op == BinaryOp::Add => {
            Ok(Value::string(&format!("{left}{right}")))
        }
        (Value::Str(a), Value::Str(b)) => compare(a.cmp(b), op)
            .map(Value::Bool)
            .ok_or_else(|| invalid_operands(op, left, right)),
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::And => Ok(Value::Bool(*a && *b)),
            BinaryOp::Or => Ok(Value::Bool(*a || *b)),
            _ => Err(invalid_operands(op, left, right)),
        },
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Ok(Value::list(items))
        }
        _ => Err(invalid_operands(op, left, right)),
    }
}

/// Map an ordering onto a comparison operator, or `None` for non-comparisons.
fn compare(ordering: Ordering, op: BinaryOp) -> Option<bool> {
    match op {
        BinaryOp::Lt => Some(ordering == Ordering::Less),
        BinaryOp::LtEq => Some(ordering != Ordering::Greater),
        BinaryOp::Gt => Some(ordering == Ordering::Greater),
        BinaryOp::GtEq => Some(ordering != Ordering::Less),
        _ => None,
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        // Truncates toward zero.
        BinaryOp::Div if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Div => checked_arith(a.checked_div(b), "division"),
        BinaryOp::Mod if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Mod => checked_arith(a.checked_rem(b), "remainder"),
        _ => compare(a.cmp(&b), op)
            .map(Value::Bool)
            .ok_or_else(|| invalid_operands(op, &Value::Int(a), &Value::Int(b))),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        _ => {
            // NaN compares false against everything.
            let result = a
                .partial_cmp(&b)
                .and_then(|ordering| compare(ordering, op));
            match result {
                Some(b) => Ok(Value::Bool(b)),
                None if matches!(
                    op,
                    BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq
                ) =>
                {
                    Ok(Value::Bool(false))
                }
                None => Err(invalid_operands(op, &Value::Float(a), &Value::Float(b))),
            }
        }
    }
}

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, Value::Int(n)) => checked_arith(n.checked_neg(), "negation"),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Not, other) => Err(type_mismatch("bool", other)),
        (UnaryOp::Neg, other) => Err(type_mismatch("number", other)),
    }
}

/// Numeric addition used by capabilities that combine payloads.
///
/// Returns `None` when either side is not a number.
pub fn add_numbers(left: &Value, right: &Value) -> Option<EvalResult> {
    if left.is_numeric() && right.is_numeric() {
        Some(evaluate_binary(left, right, BinaryOp::Add))
    } else {
        None
    }
}
