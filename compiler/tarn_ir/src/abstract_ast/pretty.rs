//! Compact single-line rendering of abstract expressions.
//!
//! ```text
//! λx.(f x)      closure with parameter x, body (f x)
//! λ.body        0-ary closure
//! (f)           0-ary call
//! [a b]         tuple
//! ∅             void
//! (+ l r)       binary operator
//! (- x)         unary operator
//! (c ? t : e)   conditional
//! (case s {k => v, ..})  first arm whose key equals s
//! e[i]          accessor
//! ```

use std::fmt::Write;

use crate::{format_number, ExprArena, ExprId, StringInterner};

use super::Expr;

/// Render the expression rooted at `id`.
pub fn pretty(arena: &ExprArena, id: ExprId, interner: &StringInterner) -> String {
    let mut out = String::new();
    Printer {
        arena,
        interner,
        out: &mut out,
    }
    .expr(id);
    out
}

struct Printer<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    out: &'a mut String,
}

impl Printer<'_> {
    fn expr(&mut self, id: ExprId) {
        match self.arena.get(id) {
            Expr::Number(bits) => self.out.push_str(&format_number(f64::from_bits(bits))),
            Expr::String(name) => {
                let _ = write!(self.out, "{:?}", self.interner.lookup(name));
            }
            Expr::Boolean(value) => {
                let _ = write!(self.out, "{value}");
            }
            Expr::Name(name) => self.out.push_str(self.interner.lookup(name)),
            Expr::Accessor { accessee, index } => {
                self.expr(accessee);
                self.out.push('[');
                self.expr(index);
                self.out.push(']');
            }
            Expr::Call { callee, parameter } => {
                self.out.push('(');
                self.expr(callee);
                if parameter.is_valid() {
                    self.out.push(' ');
                    self.expr(parameter);
                }
                self.out.push(')');
            }
            Expr::Closure { parameter, body } => {
                self.out.push('λ');
                if let Some(param) = parameter {
                    self.out.push_str(self.interner.lookup(param));
                }
                self.out.push('.');
                self.expr(body);
            }
            Expr::Tuple(range) => {
                self.out.push('[');
                for (i, &elem) in self.arena.get_expr_list(range).iter().enumerate() {
                    if i > 0 {
                        self.out.push(' ');
                    }
                    self.expr(elem);
                }
                self.out.push(']');
            }
            Expr::If { cond, then, else_ } => {
                self.out.push('(');
                self.expr(cond);
                self.out.push_str(" ? ");
                self.expr(then);
                self.out.push_str(" : ");
                self.expr(else_);
                self.out.push(')');
            }
            Expr::Case { scrutinee, arms } => {
                self.out.push_str("(case ");
                self.expr(scrutinee);
                self.out.push_str(" {");
                for (i, arm) in self.arena.get_expr_list(arms).chunks(2).enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(arm[0]);
                    self.out.push_str(" => ");
                    if let Some(&value) = arm.get(1) {
                        self.expr(value);
                    }
                }
                self.out.push_str("})");
            }
            Expr::Binary { op, left, right } => {
                let _ = write!(self.out, "({} ", op.as_symbol());
                self.expr(left);
                self.out.push(' ');
                self.expr(right);
                self.out.push(')');
            }
            Expr::Unary { op, operand } => {
                let _ = write!(self.out, "({} ", op.as_symbol());
                self.expr(operand);
                self.out.push(')');
            }
            Expr::Void => self.out.push('∅'),
        }
    }
}
