//! Tarn - lowering and evaluation behind one entry point.
//!
//! A host with a parsed surface module calls [`compile_and_run`] with a
//! print sink. Hosts that want to keep the lowered module around (to run it
//! more than once, or to inspect it) use [`LoweringCompiler`] and
//! [`Interpreter`] directly; both are re-exported here.

use std::fmt;
use std::sync::Once;

use tarn_ir::{surface, StringInterner};

pub use tarn_eval::{
    buffer_handler, callback_handler, silent_handler, stdout_handler, EvalError, EvalErrorKind,
    Interpreter, InterpreterBuilder, SharedPrintHandler,
};
pub use tarn_lower::{lower_module, CompileError, CompileErrorKind, LoweringCompiler};

/// Failure of a full pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// Lowering rejected the module; nothing ran.
    Compile(CompileError),
    /// Evaluation failed; prints issued before the failure were delivered.
    Eval(EvalError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Compile(err) => write!(f, "compile error: {err}"),
            RunError::Eval(err) => write!(f, "runtime error: {err}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Compile(err) => Some(err),
            RunError::Eval(err) => Some(err),
        }
    }
}

impl From<CompileError> for RunError {
    fn from(err: CompileError) -> Self {
        RunError::Compile(err)
    }
}

impl From<EvalError> for RunError {
    fn from(err: EvalError) -> Self {
        RunError::Eval(err)
    }
}

/// Lower `module` and execute it, sending every print to `print_handler`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile_and_run(
    module: &surface::Module,
    interner: &StringInterner,
    print_handler: SharedPrintHandler,
) -> Result<(), RunError> {
    let lowered = LoweringCompiler::new(interner).compile(module)?;
    let interpreter = Interpreter::builder(interner)
        .print_handler(print_handler)
        .build();
    interpreter.exec_module(&lowered)?;
    Ok(())
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=tarn_lower=trace` to log every lowered entry point.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
