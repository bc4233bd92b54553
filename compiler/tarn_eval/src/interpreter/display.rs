//! Display rendering shared by `print_stmt`, `to_str` and `err`.

use smallvec::SmallVec;
use tarn_ir::format_number;
use tarn_stack::ensure_sufficient_stack;

use super::machine::Machine;
use crate::environment::BinderId;
use crate::errors::EvalError;
use crate::value::Value;

impl Machine<'_, '_> {
    /// Render a value for output, forcing tuple elements as needed.
    pub(super) fn display(&mut self, value: &Value) -> Result<String, EvalError> {
        ensure_sufficient_stack(|| self.display_inner(value))
    }

    fn display_inner(&mut self, value: &Value) -> Result<String, EvalError> {
        Ok(match value {
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Void => "void".to_string(),
            Value::Tuple(tuple) => {
                let elements: SmallVec<[BinderId; 2]> =
                    SmallVec::from_slice(self.env.tuple(*tuple));
                let mut out = String::from("(");
                for (i, binder) in elements.into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let element = self.force(binder)?;
                    out.push_str(&self.display(&element)?);
                }
                out.push(')');
                out
            }
            Value::Closure(closure) => {
                let parameter = self
                    .env
                    .closure(*closure)
                    .parameter
                    .map_or("", |name| self.interpreter.interner.lookup(name));
                format!("closure{{parameter={parameter}}}")
            }
            Value::Intrinsic(intrinsic) => {
                format!("intrinsic{{name={}}}", self.env.intrinsic(*intrinsic).name())
            }
        })
    }
}
