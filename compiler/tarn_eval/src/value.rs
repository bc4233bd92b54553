//! Runtime values.
//!
//! Closures, tuples and intrinsics live in the
//! [`Environment`](crate::Environment) and are referred to by handle. Two
//! such values are the same value exactly when their handles match.

use std::rc::Rc;

use crate::environment::{ClosureId, IntrinsicId, TupleId};

/// A fully evaluated value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    String(Rc<str>),
    Boolean(bool),
    Void,
    Closure(ClosureId),
    Tuple(TupleId),
    Intrinsic(IntrinsicId),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Void => "void",
            Value::Closure(_) => "closure",
            Value::Tuple(_) => "tuple",
            Value::Intrinsic(_) => "intrinsic",
        }
    }
}

/// A number usable as a position: non-negative and integral.
pub(crate) fn integral_index(n: f64) -> Option<usize> {
    if n < 0.0 || n.fract() != 0.0 {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "checked non-negative and integral; huge values saturate"
    )]
    let index = n as usize;
    Some(index)
}
