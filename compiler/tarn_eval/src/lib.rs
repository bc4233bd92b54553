//! Tarn Eval - lazy evaluator for lowered Tarn programs.
//!
//! # Architecture
//!
//! - `Environment`: frames, binders, closures, tuples and intrinsic values
//!   addressed by handle. Bindings are evaluated at most once and then
//!   cached.
//! - `Interpreter`: configuration (interner, intrinsics, print sink).
//!   Each run gets a fresh environment.
//! - `evaluate_binary` / `evaluate_unary`: operator dispatch on values.
//! - `IntrinsicTable`: the `__core.` functions, resolved before scope.
//!
//! Arguments are passed unevaluated and forced on first use. Tuple
//! elements are deferred the same way, which is what makes
//! self-referential structures such as `xs = (1, xs)` usable.

mod environment;
pub mod errors;
mod interpreter;
mod intrinsics;
mod operators;
mod print_handler;
mod value;

pub use environment::{ClosureId, IntrinsicId, TupleId};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use intrinsics::{Delimiter, Intrinsic, IntrinsicTable};
pub use operators::{evaluate_binary, evaluate_unary, is_truthy};
pub use print_handler::{
    buffer_handler, callback_handler, silent_handler, stdout_handler, PrintCallback,
    PrintHandlerImpl, SharedPrintHandler,
};
pub use value::Value;

#[cfg(test)]
mod tests;
