//! Evaluation errors.
//!
//! Every evaluation error is fatal to the running program and propagates
//! out of [`Interpreter::exec_module`](crate::Interpreter::exec_module)
//! unchanged.
//!
//! `EvalErrorKind` carries structured data for programmatic matching.
//! Factory functions (e.g., `unbound_name()`) are the public constructors;
//! they fill in both `kind` and the rendered `message`.

use std::fmt;

use tarn_ir::BinaryOp;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed evaluation error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names
    UnboundName {
        name: String,
    },
    UnknownIntrinsic {
        name: String,
    },

    // Calls
    NotInvocable {
        kind: String,
    },
    UnexpectedParameter,

    // Access
    NotATuple {
        kind: String,
    },
    IndexNotANumber {
        kind: String,
    },
    IndexOutOfBounds {
        index: String,
        len: usize,
    },

    // Operators
    NotTruthy {
        kind: String,
    },
    ArithmeticOnNonNumbers {
        op: BinaryOp,
        left: String,
        right: String,
    },
    NegationOfNonNumber {
        kind: String,
    },
    Incomparable {
        op: BinaryOp,
        left: String,
        right: String,
    },
    Unorderable {
        op: BinaryOp,
        left: String,
        right: String,
    },

    // Intrinsics
    MissingArgument {
        intrinsic: &'static str,
    },
    IntrinsicTypeMismatch {
        intrinsic: &'static str,
        expected: &'static str,
        got: String,
    },
    IntrinsicFailed {
        intrinsic: &'static str,
        reason: String,
    },
    MissingPrintSink,
    Panic {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundName { name } => write!(f, "unbound name: {name}"),
            Self::UnknownIntrinsic { name } => write!(f, "unknown intrinsic: {name}"),

            Self::NotInvocable { kind } => write!(f, "{kind} is not invocable"),
            Self::UnexpectedParameter => {
                write!(f, "callee does not accept a parameter, but one was given")
            }

            Self::NotATuple { kind } => write!(f, "cannot index into {kind}: not a tuple"),
            Self::IndexNotANumber { kind } => {
                write!(f, "tuple index must be a number, got {kind}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for tuple of length {len}")
            }

            Self::NotTruthy { kind } => write!(f, "{kind} cannot be used as a condition"),
            Self::ArithmeticOnNonNumbers { op, left, right } => write!(
                f,
                "operator `{}` requires numbers, got {left} and {right}",
                op.as_symbol()
            ),
            Self::NegationOfNonNumber { kind } => write!(f, "cannot negate {kind}"),
            Self::Incomparable { op, left, right } => write!(
                f,
                "operator `{}` cannot compare {left} with {right}",
                op.as_symbol()
            ),
            Self::Unorderable { op, left, right } => write!(
                f,
                "operator `{}` cannot order {left} and {right}",
                op.as_symbol()
            ),

            Self::MissingArgument { intrinsic } => {
                write!(f, "intrinsic {intrinsic} called with no parameter")
            }
            Self::IntrinsicTypeMismatch {
                intrinsic,
                expected,
                got,
            } => write!(f, "intrinsic {intrinsic} expects {expected}, got {got}"),
            Self::IntrinsicFailed { intrinsic, reason } => write!(f, "{intrinsic}: {reason}"),
            Self::MissingPrintSink => write!(f, "no print sink provided to the interpreter"),
            Self::Panic { message } => write!(f, "panic: {message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Name Errors

/// Name not bound in any enclosing scope.
#[cold]
pub fn unbound_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundName {
        name: name.to_string(),
    })
}

/// Name in the intrinsic namespace with no table entry.
#[cold]
pub fn unknown_intrinsic(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownIntrinsic {
        name: name.to_string(),
    })
}

// Call Errors

/// Callee is neither a closure nor an intrinsic.
#[cold]
pub fn not_invocable(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotInvocable {
        kind: kind.to_string(),
    })
}

/// Argument passed to a 0-ary closure.
#[cold]
pub fn unexpected_parameter() -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedParameter)
}

// Access Errors

/// Accessor applied to a non-tuple.
#[cold]
pub fn not_a_tuple(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotATuple {
        kind: kind.to_string(),
    })
}

/// Accessor index is not a number.
#[cold]
pub fn index_not_a_number(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexNotANumber {
        kind: kind.to_string(),
    })
}

/// Accessor index is negative, fractional or past the end.
#[cold]
pub fn index_out_of_bounds(index: f64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        index: tarn_ir::format_number(index),
        len,
    })
}

// Operator Errors

/// Condition value has no truthiness.
#[cold]
pub fn not_truthy(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotTruthy {
        kind: kind.to_string(),
    })
}

/// Arithmetic on something other than two numbers.
#[cold]
pub fn arithmetic_on_non_numbers(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArithmeticOnNonNumbers {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

/// Unary minus on a non-number.
#[cold]
pub fn negation_of_non_number(kind: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegationOfNonNumber {
        kind: kind.to_string(),
    })
}

/// Ordering a number against a string.
#[cold]
pub fn incomparable(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Incomparable {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

/// Ordering booleans, closures, tuples or intrinsics.
#[cold]
pub fn unorderable(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unorderable {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

// Intrinsic Errors

/// Intrinsic called as `(f)` with no argument.
#[cold]
pub fn missing_argument(intrinsic: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument { intrinsic })
}

/// Intrinsic argument of the wrong kind.
#[cold]
pub fn intrinsic_type_mismatch(
    intrinsic: &'static str,
    expected: &'static str,
    got: &str,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntrinsicTypeMismatch {
        intrinsic,
        expected,
        got: got.to_string(),
    })
}

/// Intrinsic rejected a well-typed argument.
#[cold]
pub fn intrinsic_failed(intrinsic: &'static str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntrinsicFailed {
        intrinsic,
        reason: reason.into(),
    })
}

/// A print was attempted without a print sink.
#[cold]
pub fn missing_print_sink() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingPrintSink)
}

/// Program called the `err` intrinsic.
#[cold]
pub fn panic(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Panic {
        message: message.into(),
    })
}
