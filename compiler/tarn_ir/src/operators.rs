//! Operators.
//!
//! The surface tree keeps arithmetic and comparison apart; lowering merges
//! both into the single abstract [`BinaryOp`]. The two surface sets are
//! disjoint, so the merge loses nothing.

/// Surface arithmetic operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Surface comparison operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// Abstract binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// Source-level symbol, used in error messages and the pretty-printer.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }

    /// True for `+ - * / %`.
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }
}

impl From<ArithmeticOp> for BinaryOp {
    fn from(op: ArithmeticOp) -> Self {
        match op {
            ArithmeticOp::Add => Self::Add,
            ArithmeticOp::Sub => Self::Sub,
            ArithmeticOp::Mul => Self::Mul,
            ArithmeticOp::Div => Self::Div,
            ArithmeticOp::Mod => Self::Mod,
        }
    }
}

impl From<CompareOp> for BinaryOp {
    fn from(op: CompareOp) -> Self {
        match op {
            CompareOp::Eq => Self::Eq,
            CompareOp::NotEq => Self::NotEq,
            CompareOp::Lt => Self::Lt,
            CompareOp::LtEq => Self::LtEq,
            CompareOp::Gt => Self::Gt,
            CompareOp::GtEq => Self::GtEq,
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Numeric negation: `-x`.
    Neg,
    /// Logical not: `!x`.
    Not,
}

impl UnaryOp {
    /// Source-level symbol.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_operators_map_to_disjoint_binary_ops() {
        let arithmetic = [
            ArithmeticOp::Add,
            ArithmeticOp::Sub,
            ArithmeticOp::Mul,
            ArithmeticOp::Div,
            ArithmeticOp::Mod,
        ];
        let compare = [
            CompareOp::Eq,
            CompareOp::NotEq,
            CompareOp::Lt,
            CompareOp::LtEq,
            CompareOp::Gt,
            CompareOp::GtEq,
        ];
        assert!(arithmetic
            .iter()
            .all(|&op| BinaryOp::from(op).is_arithmetic()));
        assert!(compare.iter().all(|&op| !BinaryOp::from(op).is_arithmetic()));
    }

    #[test]
    fn symbols() {
        assert_eq!(BinaryOp::from(CompareOp::LtEq).as_symbol(), "<=");
        assert_eq!(BinaryOp::from(ArithmeticOp::Mod).as_symbol(), "%");
        assert_eq!(UnaryOp::Not.as_symbol(), "!");
    }
}
