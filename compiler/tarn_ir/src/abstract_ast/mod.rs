//! Abstract syntax tree: the lowering pass's output and the evaluator's input.
//!
//! Only expressions remain. Every [`Expr::Call`] passes at most one argument
//! and every [`Expr::Closure`] takes at most one parameter; multi-argument
//! forms have already been curried.
//!
//! Nodes are stored in an [`ExprArena`] and addressed by [`ExprId`]. Child
//! lists (tuple elements) are flattened into a side table addressed by
//! [`ExprRange`]. Nodes are `Copy`, so numbers are stored as their IEEE-754
//! bit pattern.

mod pretty;

use std::fmt;

use crate::{BinaryOp, Name, UnaryOp};

pub use pretty::pretty;

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Sentinel for "no expression" (a call without an argument).
    pub const INVALID: ExprId = ExprId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` unless this is [`ExprId::INVALID`].
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Contiguous run of expression IDs in the arena's list table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ExprRange {
    pub start: u32,
    pub len: u32,
}

impl ExprRange {
    pub const EMPTY: Self = Self { start: 0, len: 0 };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExprRange({}..{})",
            self.start,
            self.start + self.len
        )
    }
}

/// Abstract expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Expr {
    /// IEEE-754 bits; read back with [`Expr::number_value`].
    Number(u64),
    String(Name),
    Boolean(bool),
    Name(Name),
    Accessor {
        accessee: ExprId,
        index: ExprId,
    },
    /// `parameter` is [`ExprId::INVALID`] for a 0-ary call.
    Call {
        callee: ExprId,
        parameter: ExprId,
    },
    Closure {
        parameter: Option<Name>,
        body: ExprId,
    },
    Tuple(ExprRange),
    If {
        cond: ExprId,
        then: ExprId,
        else_: ExprId,
    },
    /// The value of the first arm whose key equals `scrutinee`, or `void`.
    ///
    /// `arms` alternates key and value. Lowering never emits this node;
    /// hosts building abstract trees directly may.
    Case {
        scrutinee: ExprId,
        arms: ExprRange,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Void,
}

impl Expr {
    /// Number node from a float.
    #[inline]
    pub fn number(value: f64) -> Self {
        Expr::Number(value.to_bits())
    }

    /// The float held by a `Number` node.
    #[inline]
    pub fn number_value(self) -> Option<f64> {
        match self {
            Expr::Number(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what}: {len} exceeds u32::MAX"))
}

/// Flat storage for abstract expressions.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    kinds: Vec<Expr>,
    expr_lists: Vec<ExprId>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, returning its ID.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.kinds.len(), "abstract expressions"));
        self.kinds.push(expr);
        id
    }

    /// The node stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    pub fn get(&self, id: ExprId) -> Expr {
        self.kinds[id.index()]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Store a list of child IDs and return its range.
    pub fn push_expr_list(&mut self, ids: &[ExprId]) -> ExprRange {
        if ids.is_empty() {
            return ExprRange::EMPTY;
        }
        let start = to_u32(self.expr_lists.len(), "expression list entries");
        self.expr_lists.extend_from_slice(ids);
        ExprRange {
            start,
            len: to_u32(ids.len(), "expression list elements"),
        }
    }

    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }
}

/// A named top-level definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub name: Name,
    pub value: ExprId,
}

/// A lowered program: definitions in source order over one arena.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub arena: ExprArena,
    pub definitions: Vec<Definition>,
}

impl Module {
    /// The value of the last definition named `name`.
    pub fn definition(&self, name: Name) -> Option<ExprId> {
        self.definitions
            .iter()
            .rev()
            .find(|d| d.name == name)
            .map(|d| d.value)
    }
}
