//! `InterpreterBuilder` for creating Interpreter instances.

use tarn_ir::StringInterner;

use super::{Interpreter, RuntimeNames};
use crate::intrinsics::IntrinsicTable;
use crate::SharedPrintHandler;

/// Builder for [`Interpreter`].
///
/// An interpreter built without a print handler runs print-free programs
/// normally and fails with `MissingPrintSink` on the first print.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    print_handler: Option<SharedPrintHandler>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            print_handler: None,
        }
    }

    /// Set the sink receiving every printed string.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            interner: self.interner,
            intrinsics: IntrinsicTable::new(self.interner),
            print_handler: self.print_handler,
            names: RuntimeNames::new(self.interner),
        }
    }
}
