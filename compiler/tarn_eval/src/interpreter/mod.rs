//! Interpreter entry points.
//!
//! An [`Interpreter`] is configuration only: the interner, the intrinsic
//! table and the print sink. All runtime state belongs to a [`Machine`]
//! created per call, so one interpreter can run any number of modules and
//! no state carries over between runs.

mod builder;
mod display;
mod function_call;
mod machine;

use tarn_ir::{reserved, Module, Name, StringInterner};
use tracing::debug;

use crate::errors::EvalError;
use crate::intrinsics::IntrinsicTable;
use crate::SharedPrintHandler;
use machine::Machine;

pub use builder::InterpreterBuilder;

/// Names the evaluator treats specially.
struct RuntimeNames {
    start: Name,
    ident: Name,
    discard: Name,
}

impl RuntimeNames {
    fn new(interner: &StringInterner) -> Self {
        RuntimeNames {
            start: interner.intern(reserved::START),
            ident: interner.intern(reserved::IDENT),
            discard: interner.intern("_"),
        }
    }

    /// Formal parameters that bind nothing.
    #[inline]
    fn is_discard(&self, name: Name) -> bool {
        name == Name::EMPTY || name == self.discard
    }
}

/// Lazy evaluator for lowered modules.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    intrinsics: IntrinsicTable,
    print_handler: Option<SharedPrintHandler>,
    names: RuntimeNames,
}

impl<'a> Interpreter<'a> {
    pub fn builder(interner: &'a StringInterner) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner)
    }

    /// Run a module.
    ///
    /// Installs every definition unevaluated in a fresh root frame, then
    /// resolves `__start` if the module has one. Resolving `__start` is what
    /// performs the program's prints. A module without `__start` does
    /// nothing.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(definitions = module.definitions.len())
    )]
    pub fn exec_module(&self, module: &Module) -> Result<(), EvalError> {
        let mut machine = Machine::new(self, module);
        if module.definition(self.names.start).is_none() {
            debug!("module has no entry point");
            return Ok(());
        }
        let root = machine.root();
        machine.resolve(root, self.names.start)?;
        debug!(
            frames = machine.frame_count(),
            peak_depth = machine.peak_depth(),
            "entry point resolved"
        );
        Ok(())
    }

    /// Evaluate the definition `name` and render its value.
    ///
    /// Rendering forces tuple elements, so an infinite structure never
    /// finishes rendering.
    pub fn display_definition(&self, module: &Module, name: Name) -> Result<String, EvalError> {
        let mut machine = Machine::new(self, module);
        let root = machine.root();
        let value = machine.resolve(root, name)?;
        machine.display(&value)
    }
}
