//! Surface syntax tree.
//!
//! The program as the author wrote it: statements, multi-parameter closures,
//! list literals and `with` bindings. An external parser builds these trees;
//! the lowering pass consumes them. `Hole` marks a fragment left incomplete
//! by editing tools and is rejected by lowering.
//!
//! Trees are owned and boxed rather than arena-allocated, so hosts and tests
//! can build them directly with the constructor helpers below.

use crate::{ArithmeticOp, CompareOp, Name, UnaryOp};

/// Surface expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    String(Name),
    Boolean(bool),
    Name(Name),
    /// `accessee[index]`
    Accessor {
        accessee: Box<Expr>,
        index: Box<Expr>,
    },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `with name = value in body`; `value` may refer to `name`.
    With {
        name: Name,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        parameters: Vec<Expr>,
    },
    Closure {
        parameters: Vec<Name>,
        body: Box<Expr>,
    },
    /// `[a, b, c]`, a cons-list literal.
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    /// A statement block; evaluates to a `world -> continuation -> result`
    /// closure.
    Procedure(Vec<Stmt>),
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        else_: Box<Expr>,
    },
    Void,
    Hole,
}

impl Expr {
    pub fn name(name: Name) -> Self {
        Expr::Name(name)
    }

    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn accessor(accessee: Expr, index: Expr) -> Self {
        Expr::Accessor {
            accessee: Box::new(accessee),
            index: Box::new(index),
        }
    }

    pub fn arithmetic(op: ArithmeticOp, left: Expr, right: Expr) -> Self {
        Expr::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn with(name: Name, value: Expr, body: Expr) -> Self {
        Expr::With {
            name,
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    pub fn call(callee: Expr, parameters: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            parameters,
        }
    }

    pub fn closure(parameters: Vec<Name>, body: Expr) -> Self {
        Expr::Closure {
            parameters,
            body: Box::new(body),
        }
    }

    pub fn if_(cond: Expr, then: Expr, else_: Expr) -> Self {
        Expr::If {
            cond: Box::new(cond),
            then: Box::new(then),
            else_: Box::new(else_),
        }
    }
}

/// Surface statement.
///
/// Compound statements take a single statement body; a block is written as
/// `Do(Procedure([...]))`.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Print(Expr),
    /// Binds `name` for every statement after this one.
    Let {
        name: Name,
        value: Expr,
    },
    If {
        condition: Expr,
        body: Box<Stmt>,
        else_: Option<Box<Stmt>>,
    },
    /// Iterates a cons-list: `value` reduces to `Void` or `(head, tail)`.
    ForIn {
        binding: Name,
        value: Expr,
        body: Box<Stmt>,
    },
    Forever(Box<Stmt>),
    /// Runs a procedure value in the current world.
    Do(Expr),
    /// Evaluates an expression for its effects and discards the value.
    Expression(Expr),
    Break,
    Continue,
    Pass,
    Hole,
}

/// Top-level definition.
#[derive(Clone, Debug, PartialEq)]
pub enum Global {
    /// The program entry point. `body` must evaluate to a procedure.
    Main { body: Expr },
    Define { name: Name, value: Expr },
    DefineFunction {
        name: Name,
        parameters: Vec<Name>,
        body: Expr,
    },
}

/// A surface program.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Module {
    pub globals: Vec<Global>,
}
