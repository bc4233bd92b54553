//! Tarn Lower - surface tree to abstract tree.
//!
//! Removes statements from a program before it ever runs. Every statement
//! block becomes a closure of shape `world -> continuation -> result`, every
//! multi-parameter closure and call is curried, list literals become
//! cons-cells, and `with` bindings become applications of a fixed-point
//! combinator.
//!
//! # Architecture
//!
//! - `lower::cps`: statement folder, surface statements to surface CPS
//!   expressions
//! - `lower`: structural expression lowering plus the curry and Y helpers
//! - [`LoweringCompiler`]: module driver; one lowered definition per global,
//!   `Main` becomes `__start`
//!
//! # Usage
//!
//! ```text
//! let interner = StringInterner::new();
//! let mut compiler = LoweringCompiler::new(&interner);
//! let module = compiler.compile(&surface_module)?;
//! ```

mod compiler;
mod error;
mod lower;

pub use compiler::{lower_module, LoweringCompiler};
pub use error::{compiler_reused, encountered_hole, CompileError, CompileErrorKind, HoleContext};
