//! Lowering errors.
//!
//! Lowering fails only on malformed input, so every error is fatal to the
//! compilation; the driver returns it instead of a module.

use std::fmt;

/// Where a hole was found.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoleContext {
    Expression,
    Statement,
}

impl fmt::Display for HoleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression => write!(f, "expression"),
            Self::Statement => write!(f, "statement"),
        }
    }
}

/// Typed compile error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// An unfinished fragment reached the compiler.
    EncounteredHole { context: HoleContext },
    /// `compile` was called a second time on the same compiler.
    CompilerReused,
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncounteredHole { context } => {
                write!(f, "encountered a hole in {context} position")
            }
            Self::CompilerReused => write!(f, "lowering compiler has already been used"),
        }
    }
}

/// Compile error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError {
    pub kind: CompileErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// The top-level definition being lowered when the error occurred.
    pub definition: Option<String>,
}

impl CompileError {
    fn from_kind(kind: CompileErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            definition: None,
        }
    }

    /// Attach the name of the definition being lowered.
    #[must_use]
    pub fn in_definition(mut self, name: &str) -> Self {
        self.definition = Some(name.to_string());
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.definition {
            Some(name) => write!(f, "{} (in definition `{name}`)", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CompileError {}

/// A hole reached the compiler.
#[cold]
pub fn encountered_hole(context: HoleContext) -> CompileError {
    CompileError::from_kind(CompileErrorKind::EncounteredHole { context })
}

/// The compiler was invoked twice.
#[cold]
pub fn compiler_reused() -> CompileError {
    CompileError::from_kind(CompileErrorKind::CompilerReused)
}
