//! Expression evaluation.

use monadic_ir::{BinaryOp, Expr, ExprKind};
use monadic_stack::ensure_sufficient_stack;

use crate::errors::undefined_variable;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::{EvalError, EvalResult, Scope, Value};

/// Evaluate an expression against `scope`.
pub fn eval_expr(expr: &Expr, scope: &Scope) -> EvalResult {
    ensure_sufficient_stack(|| eval_expr_inner(expr, scope))
}

fn eval_expr_inner(expr: &Expr, scope: &Scope) -> EvalResult {
    match &expr.kind {
        ExprKind::Int(n) => Ok(Value::Int(*n)),
        ExprKind::Float(x) => Ok(Value::Float(*x)),
        ExprKind::Str(s) => Ok(Value::Str(s.clone())),
        ExprKind::Bool(b) => Ok(Value::Bool(*b)),
        ExprKind::Null => Ok(Value::Null),
        ExprKind::Ident(name) => scope
            .lookup(name.as_str())
            .cloned()
            .ok_or_else(|| undefined_variable(name.as_str())),
        ExprKind::List(items) => items
            .iter()
            .map(|item| eval_expr(item, scope))
            .collect::<EvalResult<Vec<_>>>()
            .map(Value::list),
        ExprKind::Unary { op, operand } => evaluate_unary(*op, &eval_expr(operand, scope)?),
        ExprKind::Binary {
            op: op @ (BinaryOp::And | BinaryOp::Or),
            left,
            right,
        } => {
            let lhs = eval_expr(left, scope)?.as_bool()?;
            // Short-circuit: `false && _` and `true || _` skip the right side.
            if lhs == (*op == BinaryOp::Or) {
                return Ok(Value::Bool(lhs));
            }
            Ok(Value::Bool(eval_expr(right, scope)?.as_bool()?))
        }
        ExprKind::Binary { op, left, right } => {
            let lhs = eval_expr(left, scope)?;
            let rhs = eval_expr(right, scope)?;
            evaluate_binary(&lhs, &rhs, *op)
        }
        ExprKind::Call { callee, args } => {
            let callee = eval_expr(callee, scope)?;
            let args = args
                .iter()
                .map(|arg| eval_expr(arg, scope))
                .collect::<EvalResult<Vec<_>>>()?;
            match callee {
                Value::Function(func) => {
                    tracing::trace!(function = func.name(), args = args.len(), "native call");
                    func.call(&args)
                }
                other => Err(EvalError::NotCallable {
                    type_name: other.type_name(),
                }),
            }
        }
    }
}
