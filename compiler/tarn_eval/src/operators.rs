//! Binary and unary operator evaluation.
//!
//! Both operands are fully evaluated before dispatch. Comparison treats
//! `void` as equal to, and ordered both ways against, every value.
//! `<` and `>` are the negations of `>=` and `<=`.

use std::num::FpCategory;

use tarn_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    arithmetic_on_non_numbers, incomparable, negation_of_non_number, not_truthy, unorderable,
    EvalError, EvalResult,
};
use crate::value::Value;

/// Evaluate a binary operation.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Consistent API with evaluate_unary; operands are consumed by evaluation"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => eval_arithmetic(&left, &right, op, |a, b| a + b),
        BinaryOp::Sub => eval_arithmetic(&left, &right, op, |a, b| a - b),
        BinaryOp::Mul => eval_arithmetic(&left, &right, op, |a, b| a * b),
        BinaryOp::Div => eval_arithmetic(&left, &right, op, |a, b| a / b),
        BinaryOp::Mod => eval_arithmetic(&left, &right, op, |a, b| a % b),
        BinaryOp::Eq => Ok(Value::Boolean(values_equal(&left, &right))),
        BinaryOp::NotEq => Ok(Value::Boolean(!values_equal(&left, &right))),
        BinaryOp::LtEq => ordered(&left, &right, op, Bound::AtMost).map(Value::Boolean),
        BinaryOp::GtEq => ordered(&left, &right, op, Bound::AtLeast).map(Value::Boolean),
        BinaryOp::Lt => ordered(&left, &right, op, Bound::AtLeast).map(|ge| Value::Boolean(!ge)),
        BinaryOp::Gt => ordered(&left, &right, op, Bound::AtMost).map(|le| Value::Boolean(!le)),
    }
}

/// Evaluate a unary operation.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Consistent API with evaluate_binary"
)]
pub fn evaluate_unary(operand: Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(negation_of_non_number(operand.kind_name())),
        },
        UnaryOp::Not => is_truthy(&operand).map(|b| Value::Boolean(!b)),
    }
}

/// Truthiness of a condition.
///
/// Numbers are truthy unless zero (NaN is truthy), strings unless empty. Other
/// kinds besides booleans have no truthiness.
pub fn is_truthy(value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Number(n) => Ok(n.classify() != FpCategory::Zero),
        Value::String(s) => Ok(!s.is_empty()),
        Value::Boolean(b) => Ok(*b),
        _ => Err(not_truthy(value.kind_name())),
    }
}

fn eval_arithmetic(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    apply: impl FnOnce(f64, f64) -> f64,
) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(*a, *b))),
        _ => Err(arithmetic_on_non_numbers(
            op,
            left.kind_name(),
            right.kind_name(),
        )),
    }
}

/// Language equality.
///
/// `void` equals everything. Values of different kinds are unequal.
/// Closures, tuples and intrinsics compare by identity.
#[expect(clippy::float_cmp, reason = "number equality is IEEE equality")]
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Void, _) | (_, Value::Void) => true,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Closure(a), Value::Closure(b)) => a == b,
        (Value::Tuple(a), Value::Tuple(b)) => a == b,
        (Value::Intrinsic(a), Value::Intrinsic(b)) => a == b,
        _ => false,
    }
}

#[derive(Copy, Clone)]
enum Bound {
    /// `left <= right`
    AtMost,
    /// `left >= right`
    AtLeast,
}

fn ordered(left: &Value, right: &Value, op: BinaryOp, bound: Bound) -> Result<bool, EvalError> {
    let ordering = match (left, right) {
        (Value::Void, _) | (_, Value::Void) => return Ok(true),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            return Err(incomparable(op, left.kind_name(), right.kind_name()));
        }
        _ => return Err(unorderable(op, left.kind_name(), right.kind_name())),
    };
    // NaN is neither at most nor at least anything.
    Ok(match (ordering, bound) {
        (Some(ordering), Bound::AtMost) => ordering.is_le(),
        (Some(ordering), Bound::AtLeast) => ordering.is_ge(),
        (None, _) => false,
    })
}
