//! Evaluation state for one run and the core evaluation loop.

use smallvec::SmallVec;
use tarn_ir::{Expr, ExprArena, ExprId, ExprRange, Module, Name};
use tarn_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::environment::{BinderId, BinderState, Closure, Environment, ScopeId, Slot};
use crate::errors::{
    index_not_a_number, index_out_of_bounds, not_a_tuple, unbound_name, unknown_intrinsic,
    EvalError, EvalResult,
};
use crate::intrinsics::{is_intrinsic_name, Intrinsic};
use crate::operators::{evaluate_binary, evaluate_unary, is_truthy, values_equal};
use crate::value::{integral_index, Value};

/// Where evaluation of a call continues.
pub(super) enum Tail {
    /// The call produced its value.
    Value(Value),
    /// The call's value is that of `expr` in `scope`.
    Eval { expr: ExprId, scope: ScopeId },
}

pub(super) struct Machine<'i, 'a> {
    pub(super) interpreter: &'i Interpreter<'a>,
    arena: ExprArena,
    pub(super) env: Environment,
    /// Body of the identity closure handed back by `print_stmt`.
    pub(super) identity_body: ExprId,
    /// Nested `eval` calls currently on the native stack.
    depth: usize,
    peak_depth: usize,
}

impl<'i, 'a> Machine<'i, 'a> {
    /// Copy the module's arena and install its definitions in a new root.
    pub(super) fn new(interpreter: &'i Interpreter<'a>, module: &Module) -> Self {
        let mut arena = module.arena.clone();
        let identity_body = arena.alloc(Expr::Name(interpreter.names.ident));

        let mut env = Environment::new();
        let root = env.root();
        // Source order: a later definition replaces an earlier one.
        for definition in &module.definitions {
            env.scope(root, definition.name, definition.value);
        }

        Machine {
            interpreter,
            arena,
            env,
            identity_body,
            depth: 0,
            peak_depth: 0,
        }
    }

    pub(super) fn root(&self) -> ScopeId {
        self.env.root()
    }

    pub(super) fn frame_count(&self) -> usize {
        self.env.frame_count()
    }

    /// Deepest nesting of `eval` reached so far.
    pub(super) fn peak_depth(&self) -> usize {
        self.peak_depth
    }

    /// Value of `name` as seen from `scope`, evaluating and caching it on
    /// first use.
    pub(super) fn resolve(&mut self, scope: ScopeId, name: Name) -> EvalResult {
        let Some((owner, slot)) = self.env.lookup(scope, name) else {
            let text = self.interpreter.interner.lookup(name);
            return Err(if is_intrinsic_name(text) {
                unknown_intrinsic(text)
            } else {
                unbound_name(text)
            });
        };
        let value = match slot {
            Slot::Evaluated(value) => return Ok(value),
            Slot::Binder(binder) => self.force(binder)?,
            Slot::Unevaluated(expr) => self.eval(expr, owner)?,
        };
        self.env.cache(owner, name, value.clone());
        Ok(value)
    }

    /// Value of a binder, evaluating it in its own frame on first use.
    pub(super) fn force(&mut self, binder: BinderId) -> EvalResult {
        match self.env.binder(binder).clone() {
            BinderState::Evaluated(value) => Ok(value),
            BinderState::Unevaluated { expr, scope } => {
                let value = self.eval(expr, scope)?;
                self.env.settle(binder, value.clone());
                Ok(value)
            }
        }
    }

    /// Defer a call argument.
    ///
    /// A bare name already backed by a binder or a value is shared rather
    /// than wrapped in a new binder. Threading `__world` and `__k` through
    /// every call would otherwise leave a chain of binders, one per call,
    /// for the final force to unwind.
    pub(super) fn defer_argument(&mut self, parameter: ExprId, scope: ScopeId) -> BinderId {
        if let Expr::Name(name) = self.arena.get(parameter) {
            if self.interpreter.intrinsics.get(name).is_none() {
                match self.env.lookup(scope, name) {
                    Some((_, Slot::Binder(binder))) => return binder,
                    Some((_, Slot::Evaluated(value))) => return self.env.bind_value(value),
                    Some((_, Slot::Unevaluated(_))) | None => {}
                }
            }
        }
        self.env.bind(scope, parameter)
    }

    /// Evaluate an expression in `scope`.
    ///
    /// Every nested evaluation goes through here; the stack is grown on
    /// demand instead of overflowing on deep call chains.
    pub(super) fn eval(&mut self, expr: ExprId, scope: ScopeId) -> EvalResult {
        self.depth += 1;
        self.peak_depth = self.peak_depth.max(self.depth);
        let result = ensure_sufficient_stack(|| self.eval_inner(expr, scope));
        self.depth -= 1;
        result
    }

    /// Closure bodies and `if` branches are evaluated in place rather than
    /// through a nested `eval`, so chains of continuation calls run in
    /// constant native stack.
    fn eval_inner(&mut self, mut expr: ExprId, mut scope: ScopeId) -> EvalResult {
        loop {
            match self.eval_step(expr, scope)? {
                Tail::Value(value) => return Ok(value),
                Tail::Eval {
                    expr: next,
                    scope: frame,
                } => {
                    expr = next;
                    scope = frame;
                }
            }
        }
    }

    fn eval_step(&mut self, expr: ExprId, scope: ScopeId) -> Result<Tail, EvalError> {
        let value = match self.arena.get(expr) {
            Expr::Number(bits) => Ok(Value::Number(f64::from_bits(bits))),
            Expr::String(text) => Ok(Value::string(self.interpreter.interner.lookup(text))),
            Expr::Boolean(b) => Ok(Value::Boolean(b)),
            Expr::Void => Ok(Value::Void),
            Expr::Name(name) => self.eval_name(name, scope),
            Expr::Accessor { accessee, index } => self.eval_accessor(accessee, index, scope),
            Expr::Call { callee, parameter } => return self.eval_call(callee, parameter, scope),
            Expr::Closure { parameter, body } => {
                let closure = self.env.alloc_closure(Closure {
                    parameter,
                    body,
                    scope,
                });
                Ok(Value::Closure(closure))
            }
            Expr::Tuple(range) => {
                let elements: SmallVec<[BinderId; 2]> = self
                    .arena
                    .get_expr_list(range)
                    .iter()
                    .map(|&element| self.env.bind(scope, element))
                    .collect();
                Ok(Value::Tuple(self.env.alloc_tuple(elements)))
            }
            Expr::If { cond, then, else_ } => {
                let condition = self.eval(cond, scope)?;
                let branch = if is_truthy(&condition)? { then } else { else_ };
                return Ok(Tail::Eval {
                    expr: branch,
                    scope,
                });
            }
            Expr::Case { scrutinee, arms } => self.eval_case(scrutinee, arms, scope),
            Expr::Binary { op, left, right } => {
                let left = self.eval(left, scope)?;
                let right = self.eval(right, scope)?;
                evaluate_binary(left, right, op)
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval(operand, scope)?;
                evaluate_unary(operand, op)
            }
        };
        value.map(Tail::Value)
    }

    fn eval_name(&mut self, name: Name, scope: ScopeId) -> EvalResult {
        let interpreter = self.interpreter;
        if let Some(intrinsic) = interpreter.intrinsics.get(name) {
            return Ok(self.intrinsic_value(intrinsic.clone()));
        }
        self.resolve(scope, name)
    }

    /// A new intrinsic value, distinct from every other.
    pub(super) fn intrinsic_value(&mut self, intrinsic: Intrinsic) -> Value {
        Value::Intrinsic(self.env.alloc_intrinsic(intrinsic))
    }

    /// Keys are evaluated in order until one equals the scrutinee; only
    /// that arm's value is evaluated.
    fn eval_case(&mut self, scrutinee: ExprId, arms: ExprRange, scope: ScopeId) -> EvalResult {
        let value = self.eval(scrutinee, scope)?;
        let arms: SmallVec<[ExprId; 8]> = SmallVec::from_slice(self.arena.get_expr_list(arms));
        for arm in arms.chunks(2) {
            let key = self.eval(arm[0], scope)?;
            if values_equal(&value, &key) {
                return match arm.get(1) {
                    Some(&result) => self.eval(result, scope),
                    None => Ok(Value::Void),
                };
            }
        }
        Ok(Value::Void)
    }

    fn eval_accessor(&mut self, accessee: ExprId, index: ExprId, scope: ScopeId) -> EvalResult {
        let target = self.eval(accessee, scope)?;
        let Value::Tuple(tuple) = target else {
            return Err(not_a_tuple(target.kind_name()));
        };
        let index = match self.eval(index, scope)? {
            Value::Number(n) => n,
            other => return Err(index_not_a_number(other.kind_name())),
        };
        let elements = self.env.tuple(tuple);
        let binder = integral_index(index)
            .and_then(|i| elements.get(i).copied())
            .ok_or_else(|| index_out_of_bounds(index, elements.len()))?;
        self.force(binder)
    }
}
