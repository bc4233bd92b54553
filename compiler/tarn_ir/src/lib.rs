//! Tarn IR - syntax trees shared by the lowering pass and the evaluator.
//!
//! # Architecture
//!
//! Two tree forms live here:
//!
//! - [`surface`]: the program as authored. Statements, multi-parameter
//!   closures, lists and `with` bindings. Built by an external reader and
//!   parser; this workspace only consumes it.
//! - [`abstract_ast`]: the lowered program. Expressions only, every call and
//!   closure has at most one parameter. Stored in a flat [`ExprArena`]
//!   addressed by [`ExprId`].
//!
//! Identifiers and string literal contents are interned through a shared
//! [`StringInterner`] and referred to by [`Name`].

pub mod abstract_ast;
mod interner;
mod name;
mod number;
mod operators;
pub mod surface;

pub use abstract_ast::{Definition, Expr, ExprArena, ExprId, ExprRange, Module};
pub use interner::{InternError, StringInterner};
pub use name::{reserved, Name};
pub use number::format_number;
pub use operators::{ArithmeticOp, BinaryOp, CompareOp, UnaryOp};
