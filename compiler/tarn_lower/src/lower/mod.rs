//! Surface expression lowering.
//!
//! Pure structural recursion from [`surface::Expr`] into the abstract
//! arena:
//! - literals, names and `void` copy through
//! - arithmetic and comparison collapse into `Expr::Binary`
//! - `Closure` is curried, `Call` is folded into single-argument calls
//! - `List` becomes nested `[head tail]` tuples ending in `∅`
//! - `With` applies a closure over the bound name to the fixed point of the
//!   bound value
//! - `Procedure` is folded to CPS first (see [`cps`]), then lowered
//! - `Hole` is an error

mod cps;

use tarn_ir::reserved;
use tarn_ir::{surface, Definition, Expr, ExprArena, ExprId, Module, Name, StringInterner};
use tarn_stack::ensure_sufficient_stack;

use crate::error::{encountered_hole, CompileError, HoleContext};

/// Pre-interned names the lowering pass introduces.
pub(crate) struct LoweringNames {
    pub(crate) k: Name,
    pub(crate) world: Name,
    pub(crate) break_: Name,
    pub(crate) continue_: Name,
    pub(crate) loop_: Name,
    pub(crate) iter: Name,
    pub(crate) next: Name,
    pub(crate) print: Name,
    pub(crate) is_void: Name,
    pub(crate) start: Name,
    /// Parameters of the fixed-point combinator.
    y_f: Name,
    y_x: Name,
}

impl LoweringNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            k: interner.intern(reserved::K),
            world: interner.intern(reserved::WORLD),
            break_: interner.intern(reserved::BREAK),
            continue_: interner.intern(reserved::CONTINUE),
            loop_: interner.intern(reserved::LOOP),
            iter: interner.intern(reserved::ITER),
            next: interner.intern(reserved::NEXT),
            print: interner.intern(&format!("{}print_stmt", reserved::INTRINSIC_NAMESPACE)),
            is_void: interner.intern(&format!("{}is_void", reserved::INTRINSIC_NAMESPACE)),
            start: interner.intern(reserved::START),
            y_f: interner.intern("f"),
            y_x: interner.intern("x"),
        }
    }
}

/// State for one surface-to-abstract lowering run.
///
/// Owns the abstract arena being built.
pub(crate) struct Lowerer {
    pub(crate) arena: ExprArena,
    pub(crate) names: LoweringNames,
}

impl Lowerer {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            arena: ExprArena::new(),
            names: LoweringNames::new(interner),
        }
    }

    /// Finish lowering and produce the module.
    pub(crate) fn finish(self, definitions: Vec<Definition>) -> Module {
        Module {
            arena: self.arena,
            definitions,
        }
    }

    #[inline]
    fn push(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc(expr)
    }

    /// Lower one surface expression.
    pub(crate) fn lower_expr(&mut self, expr: &surface::Expr) -> Result<ExprId, CompileError> {
        ensure_sufficient_stack(|| self.lower_expr_inner(expr))
    }

    fn lower_expr_inner(&mut self, expr: &surface::Expr) -> Result<ExprId, CompileError> {
        use surface::Expr as S;

        let lowered = match expr {
            S::Number(value) => Expr::number(*value),
            S::String(text) => Expr::String(*text),
            S::Boolean(value) => Expr::Boolean(*value),
            S::Name(name) => Expr::Name(*name),
            S::Void => Expr::Void,
            S::Hole => return Err(encountered_hole(HoleContext::Expression)),

            S::Accessor { accessee, index } => Expr::Accessor {
                accessee: self.lower_expr(accessee)?,
                index: self.lower_expr(index)?,
            },
            S::Arithmetic { op, left, right } => Expr::Binary {
                op: (*op).into(),
                left: self.lower_expr(left)?,
                right: self.lower_expr(right)?,
            },
            S::Compare { op, left, right } => Expr::Binary {
                op: (*op).into(),
                left: self.lower_expr(left)?,
                right: self.lower_expr(right)?,
            },
            S::Unary { op, operand } => Expr::Unary {
                op: *op,
                operand: self.lower_expr(operand)?,
            },
            S::If { cond, then, else_ } => Expr::If {
                cond: self.lower_expr(cond)?,
                then: self.lower_expr(then)?,
                else_: self.lower_expr(else_)?,
            },
            S::Tuple(values) => {
                let ids = values
                    .iter()
                    .map(|value| self.lower_expr(value))
                    .collect::<Result<Vec<_>, _>>()?;
                Expr::Tuple(self.arena.push_expr_list(&ids))
            }

            S::With { name, value, body } => return self.lower_with(*name, value, body),
            S::Call { callee, parameters } => return self.lower_call(callee, parameters),
            S::Closure { parameters, body } => return self.curry(parameters, body),
            S::List(contents) => return self.lower_list(contents),
            S::Procedure(body) => {
                let folded = self.fold_procedure(body)?;
                return self.lower_expr(&folded);
            }
        };
        Ok(self.push(lowered))
    }

    /// Curry `parameters` around the lowered `body`.
    ///
    /// Each parameter wraps the closure built so far, so the outermost
    /// closure binds the last parameter. [`Self::lower_call`] applies the
    /// last argument first, which makes the two agree. No parameters gives
    /// a single 0-ary closure.
    pub(crate) fn curry(
        &mut self,
        parameters: &[Name],
        body: &surface::Expr,
    ) -> Result<ExprId, CompileError> {
        let body = self.lower_expr(body)?;
        if parameters.is_empty() {
            return Ok(self.push(Expr::Closure {
                parameter: None,
                body,
            }));
        }

        let mut closure = body;
        for &parameter in parameters {
            closure = self.push(Expr::Closure {
                parameter: Some(parameter),
                body: closure,
            });
        }
        Ok(closure)
    }

    /// `f(a0, .., an)` becomes `((f an) .. a0)`; `f()` becomes `(f)`.
    fn lower_call(
        &mut self,
        callee: &surface::Expr,
        parameters: &[surface::Expr],
    ) -> Result<ExprId, CompileError> {
        let mut call = self.lower_expr(callee)?;
        if parameters.is_empty() {
            return Ok(self.push(Expr::Call {
                callee: call,
                parameter: ExprId::INVALID,
            }));
        }

        for parameter in parameters.iter().rev() {
            let parameter = self.lower_expr(parameter)?;
            call = self.push(Expr::Call {
                callee: call,
                parameter,
            });
        }
        Ok(call)
    }

    fn lower_list(&mut self, contents: &[surface::Expr]) -> Result<ExprId, CompileError> {
        let mut list = self.push(Expr::Void);
        for elem in contents.iter().rev() {
            let head = self.lower_expr(elem)?;
            let cell = self.arena.push_expr_list(&[head, list]);
            list = self.push(Expr::Tuple(cell));
        }
        Ok(list)
    }

    /// `with name = value in body` as `(λname.body) Y(λname.value)`.
    fn lower_with(
        &mut self,
        name: Name,
        value: &surface::Expr,
        body: &surface::Expr,
    ) -> Result<ExprId, CompileError> {
        let body = self.lower_expr(body)?;
        let scope = self.push(Expr::Closure {
            parameter: Some(name),
            body,
        });

        let value = self.lower_expr(value)?;
        let almost = self.push(Expr::Closure {
            parameter: Some(name),
            body: value,
        });
        let fixed = self.fixed_point(almost);

        Ok(self.push(Expr::Call {
            callee: scope,
            parameter: fixed,
        }))
    }

    /// Apply the fixed-point combinator to `almost`, a closure of shape
    /// `self -> value`:
    ///
    /// ```text
    /// (λf.((λx.(x x)) (λx.(f (x x)))) almost)
    /// ```
    ///
    /// Arguments are passed unevaluated, so the inner `(x x)` is only
    /// unfolded when the value actually refers to itself.
    pub(crate) fn fixed_point(&mut self, almost: ExprId) -> ExprId {
        let (f, x) = (self.names.y_f, self.names.y_x);

        let x_ref = self.push(Expr::Name(x));
        let x_of_x = self.push(Expr::Call {
            callee: x_ref,
            parameter: x_ref,
        });
        let self_apply = self.push(Expr::Closure {
            parameter: Some(x),
            body: x_of_x,
        });

        let f_ref = self.push(Expr::Name(f));
        let f_of_x_of_x = self.push(Expr::Call {
            callee: f_ref,
            parameter: x_of_x,
        });
        let unroll = self.push(Expr::Closure {
            parameter: Some(x),
            body: f_of_x_of_x,
        });

        let combinator_body = self.push(Expr::Call {
            callee: self_apply,
            parameter: unroll,
        });
        let combinator = self.push(Expr::Closure {
            parameter: Some(f),
            body: combinator_body,
        });

        self.push(Expr::Call {
            callee: combinator,
            parameter: almost,
        })
    }

    /// `Main(body)` as `body(void, λ__world.__world)`, applied the same way
    /// [`Self::lower_call`] folds a two-argument call.
    pub(crate) fn lower_main(&mut self, body: &surface::Expr) -> Result<ExprId, CompileError> {
        let procedure = self.lower_expr(body)?;

        let world = self.names.world;
        let world_ref = self.push(Expr::Name(world));
        let finish = self.push(Expr::Closure {
            parameter: Some(world),
            body: world_ref,
        });
        let void = self.push(Expr::Void);

        let with_finish = self.push(Expr::Call {
            callee: procedure,
            parameter: finish,
        });
        Ok(self.push(Expr::Call {
            callee: with_finish,
            parameter: void,
        }))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
