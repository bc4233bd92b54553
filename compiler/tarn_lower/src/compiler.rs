//! Module driver.
//!
//! Lowers each global in order into one shared arena:
//! - `Main(body)` becomes `__start = body(void, λ__world.__world)`
//! - `Define(name, value)` becomes `name = value`
//! - `DefineFunction(name, params, body)` becomes `name = curry(params, body)`
//!
//! The first failing global aborts the run; its error names the definition.

use tarn_ir::{abstract_ast, surface, Definition, Module, StringInterner};

use crate::error::{compiler_reused, CompileError};
use crate::lower::Lowerer;

/// Lower a surface module.
#[tracing::instrument(level = "debug", skip_all, fields(globals = module.globals.len()))]
pub fn lower_module(
    module: &surface::Module,
    interner: &StringInterner,
) -> Result<Module, CompileError> {
    let mut lowerer = Lowerer::new(interner);
    let mut definitions = Vec::with_capacity(module.globals.len());

    for global in &module.globals {
        let (name, value) = match global {
            surface::Global::Main { body } => (lowerer.names.start, lowerer.lower_main(body)),
            surface::Global::Define { name, value } => (*name, lowerer.lower_expr(value)),
            surface::Global::DefineFunction {
                name,
                parameters,
                body,
            } => (*name, lowerer.curry(parameters, body)),
        };
        let value = value.map_err(|err| err.in_definition(interner.lookup(name)))?;
        tracing::debug!(definition = interner.lookup(name), "lowered");
        definitions.push(Definition { name, value });
    }

    let start_name = lowerer.names.start;
    let module = lowerer.finish(definitions);
    if let Some(start) = module.definition(start_name) {
        tracing::trace!(
            start = %abstract_ast::pretty(&module.arena, start, interner),
            "entry point"
        );
    }
    tracing::debug!(nodes = module.arena.len(), "lowering complete");
    Ok(module)
}

/// Single-use lowering compiler.
///
/// Wraps [`lower_module`] with the usage contract of a compiler pass: one
/// instance compiles one module. A second `compile` call fails with
/// [`CompileErrorKind::CompilerReused`](crate::CompileErrorKind::CompilerReused)
/// regardless of how the first one ended.
pub struct LoweringCompiler<'a> {
    interner: &'a StringInterner,
    used: bool,
}

impl<'a> LoweringCompiler<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            used: false,
        }
    }

    /// Lower `module`, or return the first error encountered.
    pub fn compile(&mut self, module: &surface::Module) -> Result<Module, CompileError> {
        if self.used {
            return Err(compiler_reused());
        }
        self.used = true;
        lower_module(module, self.interner)
    }
}
