//! Statement folding into continuation-passing style.
//!
//! A statement list becomes one surface expression of shape
//! `λ(__world, __k). ...`. The list is folded from the end: each statement
//! receives "everything after me" as a continuation of that same shape and
//! produces a new one. The seed continuation hands the final world to `__k`.
//!
//! Loops bind `__loop` through a `with`, so they recurse via the fixed-point
//! combinator, and capture `__break`/`__continue` lexically. Exiting a loop
//! is a plain call of the captured continuation.
//!
//! The output is still surface syntax (multi-parameter closures and calls);
//! the caller lowers it like any other expression.

use tarn_ir::surface::{Expr, Stmt};
use tarn_ir::Name;

use super::Lowerer;
use crate::error::{encountered_hole, CompileError, HoleContext};

impl Lowerer {
    /// Fold a procedure body into a single `λ(__world, __k)` expression.
    pub(crate) fn fold_procedure(&self, body: &[Stmt]) -> Result<Expr, CompileError> {
        let mut tail = self.cps_closed(Expr::call(Expr::name(self.names.k), vec![self.world()]));
        for stmt in body.iter().rev() {
            tail = self.statement_cps(stmt, tail)?;
        }
        Ok(tail)
    }

    fn statement_cps(&self, stmt: &Stmt, continuation: Expr) -> Result<Expr, CompileError> {
        let names = &self.names;
        let cps = match stmt {
            // λ(w, k). body(w, λw. cont(w, k))
            Stmt::Do(body) => self.cps_closed(Expr::call(
                body.clone(),
                vec![self.world(), self.cps_continue(continuation)],
            )),

            // λ(w, k). (print value)(cont(w, k))
            Stmt::Print(value) => {
                let print = Expr::call(Expr::name(names.print), vec![value.clone()]);
                self.cps_closed(Expr::call(print, vec![self.resume(continuation)]))
            }

            // λ(w, k). with name = value in cont(w, k)
            Stmt::Let { name, value } => self.cps_closed(Expr::with(
                *name,
                value.clone(),
                self.resume(continuation),
            )),

            Stmt::If {
                condition,
                body,
                else_,
            } => self.if_cps(condition, body, else_.as_deref(), continuation)?,

            // λ(w, k). __break(w)
            Stmt::Break => self.cps_closed(Expr::call(Expr::name(names.break_), vec![self.world()])),

            // λ(w, k). __continue(w)
            Stmt::Continue => {
                self.cps_closed(Expr::call(Expr::name(names.continue_), vec![self.world()]))
            }

            Stmt::Expression(value) => self.expression_cps(value, continuation),

            // λ(w, k). cont(w, k)
            Stmt::Pass => self.cps_closed(self.resume(continuation)),

            Stmt::Forever(body) => self.forever_cps(body, continuation)?,

            Stmt::ForIn {
                binding,
                value,
                body,
            } => self.for_in_cps(*binding, value, body, continuation)?,

            Stmt::Hole => return Err(encountered_hole(HoleContext::Statement)),
        };
        Ok(cps)
    }

    /// ```text
    /// λ(w, k). (λ__next. if cond
    ///                    then CPS(body, λ(w, k).__next(w))(w, k)
    ///                    else CPS(else, λ(w, k).__next(w))(w, k) | __next(w))
    ///          (λw. cont(w, k))
    /// ```
    ///
    /// Both arms rejoin through `__next`, so the statements after the `if`
    /// appear once in the output and run once.
    fn if_cps(
        &self,
        condition: &Expr,
        body: &Stmt,
        else_: Option<&Stmt>,
        continuation: Expr,
    ) -> Result<Expr, CompileError> {
        let next = self.names.next;
        let rejoin = Expr::call(Expr::name(next), vec![self.world()]);
        let next_continuation = self.cps_closed(rejoin.clone());

        let then = self.resume(self.statement_cps(body, next_continuation.clone())?);
        let otherwise = match else_ {
            Some(stmt) => self.resume(self.statement_cps(stmt, next_continuation)?),
            None => rejoin,
        };

        Ok(self.cps_closed(Expr::call(
            Expr::closure(vec![next], Expr::if_(condition.clone(), then, otherwise)),
            vec![self.cps_continue(continuation)],
        )))
    }

    /// ```text
    /// λ(w, k). (λ__next. if is_void(value) then __next(w) else __next(w))
    ///          (λw. cont(w, k))
    /// ```
    ///
    /// `is_void` is strict in its argument, so the condition forces `value`
    /// whatever its kind. Either way execution resumes at `__next`.
    fn expression_cps(&self, value: &Expr, continuation: Expr) -> Expr {
        let names = &self.names;
        let resume = || Expr::call(Expr::name(names.next), vec![self.world()]);
        let force = Expr::if_(
            Expr::call(Expr::name(names.is_void), vec![value.clone()]),
            resume(),
            resume(),
        );
        self.cps_closed(Expr::call(
            Expr::closure(vec![names.next], force),
            vec![self.cps_continue(continuation)],
        ))
    }

    /// ```text
    /// λ(w, k). (λ__break.
    ///              with __loop = λw. (λ__continue. CPS(body, λ(w, k).__loop(w))(w, k)) __loop
    ///              in __loop(w))
    ///          (λw. cont(w, k))
    /// ```
    fn forever_cps(&self, body: &Stmt, continuation: Expr) -> Result<Expr, CompileError> {
        let names = &self.names;
        let again = self.cps_closed(Expr::call(Expr::name(names.loop_), vec![self.world()]));
        let iteration = self.resume(self.statement_cps(body, again)?);
        let iteration = Expr::call(
            Expr::closure(vec![names.continue_], iteration),
            vec![Expr::name(names.loop_)],
        );
        let loop_fn = Expr::closure(vec![names.world], iteration);

        Ok(self.loop_frame(loop_fn, vec![self.world()], continuation))
    }

    /// ```text
    /// λ(w, k). (λ__break.
    ///              with __loop = λ(__iter, w).
    ///                  if is_void(__iter) then __break(w)
    ///                  else (λ__continue. (λbinding. CPS(body, λ(w, k).__loop(__iter[1], w))(w, k))
    ///                                     __iter[0])
    ///                       (λw. __loop(__iter[1], w))
    ///              in __loop(value, w))
    ///          (λw. cont(w, k))
    /// ```
    fn for_in_cps(
        &self,
        binding: Name,
        value: &Expr,
        body: &Stmt,
        continuation: Expr,
    ) -> Result<Expr, CompileError> {
        let names = &self.names;
        let iter = || Expr::name(names.iter);
        let advance = || {
            Expr::call(
                Expr::name(names.loop_),
                vec![Expr::accessor(iter(), Expr::number(1.0)), self.world()],
            )
        };

        let iteration = self.resume(self.statement_cps(body, self.cps_closed(advance()))?);
        let bind_head = Expr::call(
            Expr::closure(vec![binding], iteration),
            vec![Expr::accessor(iter(), Expr::number(0.0))],
        );
        let with_continue = Expr::call(
            Expr::closure(vec![names.continue_], bind_head),
            vec![Expr::closure(vec![names.world], advance())],
        );
        let step = Expr::if_(
            Expr::call(Expr::name(names.is_void), vec![iter()]),
            Expr::call(Expr::name(names.break_), vec![self.world()]),
            with_continue,
        );
        let loop_fn = Expr::closure(vec![names.iter, names.world], step);

        Ok(self.loop_frame(
            loop_fn,
            vec![value.clone(), self.world()],
            continuation,
        ))
    }

    /// Shared loop scaffolding: bind `__break` to the continuation after
    /// the loop, bind `__loop` recursively, then start it with `start_args`.
    fn loop_frame(&self, loop_fn: Expr, start_args: Vec<Expr>, continuation: Expr) -> Expr {
        let names = &self.names;
        let run = Expr::with(
            names.loop_,
            loop_fn,
            Expr::call(Expr::name(names.loop_), start_args),
        );
        self.cps_closed(Expr::call(
            Expr::closure(vec![names.break_], run),
            vec![self.cps_continue(continuation)],
        ))
    }

    #[inline]
    fn world(&self) -> Expr {
        Expr::Name(self.names.world)
    }

    /// `λ(__world, __k). body`
    fn cps_closed(&self, body: Expr) -> Expr {
        Expr::closure(vec![self.names.world, self.names.k], body)
    }

    /// `continuation(__world, __k)`
    fn resume(&self, continuation: Expr) -> Expr {
        Expr::call(
            continuation,
            vec![self.world(), Expr::Name(self.names.k)],
        )
    }

    /// `λ__world. continuation(__world, __k)`
    fn cps_continue(&self, continuation: Expr) -> Expr {
        Expr::closure(vec![self.names.world], self.resume(continuation))
    }
}
