//! Closure application and intrinsic calls.

use smallvec::smallvec;
use tarn_ir::ExprId;
use tracing::trace;

use super::machine::{Machine, Tail};
use crate::environment::{Closure, ClosureId, ScopeId};
use crate::errors::{
    intrinsic_failed, intrinsic_type_mismatch, missing_argument, missing_print_sink,
    not_invocable, panic, unexpected_parameter, EvalError, EvalResult,
};
use crate::intrinsics::{split_at_char, Delimiter, Intrinsic};
use crate::value::Value;

impl Machine<'_, '_> {
    /// `(callee parameter)`, where `parameter` may be `ExprId::INVALID`.
    ///
    /// A closure call hands back its body for the caller to evaluate.
    pub(super) fn eval_call(
        &mut self,
        callee: ExprId,
        parameter: ExprId,
        scope: ScopeId,
    ) -> Result<Tail, EvalError> {
        match self.eval(callee, scope)? {
            Value::Closure(closure) => self.call_closure(closure, parameter, scope),
            Value::Intrinsic(id) => {
                let intrinsic = self.env.intrinsic(id).clone();
                // Intrinsics are strict in their argument.
                let argument = if parameter.is_valid() {
                    Some(self.eval(parameter, scope)?)
                } else {
                    None
                };
                self.call_intrinsic(&intrinsic, argument).map(Tail::Value)
            }
            other => Err(not_invocable(other.kind_name())),
        }
    }

    /// Open a new frame under the captured one for the closure body.
    ///
    /// The argument is bound unevaluated. A call without an argument
    /// leaves the formal unbound.
    fn call_closure(
        &mut self,
        id: ClosureId,
        parameter: ExprId,
        scope: ScopeId,
    ) -> Result<Tail, EvalError> {
        let closure = self.env.closure(id);
        let frame = self.env.child(closure.scope);
        if parameter.is_valid() {
            let Some(formal) = closure.parameter else {
                return Err(unexpected_parameter());
            };
            if !self.interpreter.names.is_discard(formal) {
                let binder = self.defer_argument(parameter, scope);
                self.env.rebind(frame, formal, binder);
            }
        }
        trace!(frame = ?frame, "call");
        Ok(Tail::Eval {
            expr: closure.body,
            scope: frame,
        })
    }

    fn call_intrinsic(&mut self, intrinsic: &Intrinsic, argument: Option<Value>) -> EvalResult {
        let Some(argument) = argument else {
            return Err(missing_argument(intrinsic.name()));
        };
        match intrinsic {
            Intrinsic::PrintStmt => {
                let interpreter = self.interpreter;
                let sink = interpreter
                    .print_handler
                    .as_ref()
                    .ok_or_else(missing_print_sink)?;
                let text = self.display(&argument)?;
                sink.println(&text);
                Ok(self.identity())
            }
            Intrinsic::ToStr => Ok(Value::string(self.display(&argument)?)),
            Intrinsic::IsVoid => Ok(Value::Boolean(matches!(argument, Value::Void))),
            Intrinsic::StrCat => match argument {
                Value::String(right) => Ok(self.intrinsic_value(Intrinsic::StrCatOnto(right))),
                other => Err(intrinsic_type_mismatch(
                    "str_cat",
                    "a string",
                    other.kind_name(),
                )),
            },
            Intrinsic::StrCatOnto(right) => match argument {
                Value::String(left) => Ok(Value::string(format!("{left}{right}"))),
                other => Err(intrinsic_type_mismatch(
                    "str_cat",
                    "a string",
                    other.kind_name(),
                )),
            },
            Intrinsic::StrSplit => match argument {
                Value::String(text) => {
                    Ok(self.intrinsic_value(Intrinsic::StrSplitOn(Delimiter::Text(text))))
                }
                Value::Number(index) => {
                    Ok(self.intrinsic_value(Intrinsic::StrSplitOn(Delimiter::Index(index))))
                }
                other => Err(intrinsic_type_mismatch(
                    "str_split",
                    "a string or number",
                    other.kind_name(),
                )),
            },
            Intrinsic::StrSplitOn(delimiter) => {
                let Value::String(text) = argument else {
                    return Err(intrinsic_type_mismatch(
                        "str_split",
                        "a string",
                        argument.kind_name(),
                    ));
                };
                let halves = match delimiter {
                    Delimiter::Text(delimiter) => text.split_once(&**delimiter),
                    Delimiter::Index(index) => split_at_char(&text, *index),
                };
                let Some((head, tail)) = halves else {
                    return Err(intrinsic_failed(
                        "str_split",
                        format!("cannot split {text:?} there"),
                    ));
                };
                let head = self.env.bind_value(Value::string(head));
                let tail = self.env.bind_value(Value::string(tail));
                Ok(Value::Tuple(self.env.alloc_tuple(smallvec![head, tail])))
            }
            Intrinsic::Err => Err(panic(self.display(&argument)?)),
        }
    }

    /// `λ__ident.__ident`, closed over the root frame.
    fn identity(&mut self) -> Value {
        let root = self.env.root();
        let closure = self.env.alloc_closure(Closure {
            parameter: Some(self.interpreter.names.ident),
            body: self.identity_body,
            scope: root,
        });
        Value::Closure(closure)
    }
}
