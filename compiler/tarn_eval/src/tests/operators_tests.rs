//! Tests for `evaluate_binary`, `evaluate_unary` and `is_truthy`.

use tarn_ir::{BinaryOp, UnaryOp};

use crate::environment::Environment;
use crate::{evaluate_binary, evaluate_unary, is_truthy, EvalErrorKind, Intrinsic, Value};

fn intrinsic(intrinsic: Intrinsic) -> Value {
    Value::Intrinsic(Environment::new().alloc_intrinsic(intrinsic))
}

fn binary(left: Value, op: BinaryOp, right: Value) -> Value {
    evaluate_binary(left, right, op).unwrap_or_else(|e| panic!("{e}"))
}

fn binary_error(left: Value, op: BinaryOp, right: Value) -> EvalErrorKind {
    match evaluate_binary(left, right, op) {
        Ok(value) => panic!("expected error, got {value:?}"),
        Err(err) => err.kind,
    }
}

fn num(n: f64) -> Value {
    Value::Number(n)
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn basic_operations() {
        assert_eq!(binary(num(2.0), BinaryOp::Add, num(3.0)), num(5.0));
        assert_eq!(binary(num(2.0), BinaryOp::Sub, num(3.0)), num(-1.0));
        assert_eq!(binary(num(2.0), BinaryOp::Mul, num(3.0)), num(6.0));
        assert_eq!(binary(num(3.0), BinaryOp::Div, num(2.0)), num(1.5));
        assert_eq!(binary(num(7.0), BinaryOp::Mod, num(3.0)), num(1.0));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(
            binary(num(1.0), BinaryOp::Div, num(0.0)),
            num(f64::INFINITY)
        );
        assert_eq!(
            binary(num(-1.0), BinaryOp::Div, num(0.0)),
            num(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn remainder_by_zero_is_nan() {
        let Value::Number(n) = binary(num(1.0), BinaryOp::Mod, num(0.0)) else {
            panic!("expected a number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn non_numbers_fail() {
        assert_eq!(
            binary_error(num(1.0), BinaryOp::Add, Value::string("a")),
            EvalErrorKind::ArithmeticOnNonNumbers {
                op: BinaryOp::Add,
                left: "number".to_string(),
                right: "string".to_string(),
            }
        );
        assert!(matches!(
            binary_error(Value::Void, BinaryOp::Mul, num(1.0)),
            EvalErrorKind::ArithmeticOnNonNumbers { .. }
        ));
    }
}

mod equality {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn void_equals_everything() {
        assert_eq!(
            binary(Value::Void, BinaryOp::Eq, num(5.0)),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(Value::string("x"), BinaryOp::Eq, Value::Void),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(Value::Void, BinaryOp::NotEq, num(5.0)),
            Value::Boolean(false)
        );
    }

    #[test]
    fn different_kinds_are_unequal() {
        assert_eq!(
            binary(num(5.0), BinaryOp::Eq, Value::string("5")),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(Value::Boolean(true), BinaryOp::Eq, num(1.0)),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(num(5.0), BinaryOp::NotEq, Value::string("5")),
            Value::Boolean(true)
        );
    }

    #[test]
    fn same_kind_compares_by_value() {
        assert_eq!(
            binary(Value::string("ab"), BinaryOp::Eq, Value::string("ab")),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(Value::Boolean(true), BinaryOp::Eq, Value::Boolean(false)),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(num(f64::NAN), BinaryOp::Eq, num(f64::NAN)),
            Value::Boolean(false)
        );
    }

    #[test]
    fn intrinsics_compare_by_identity() {
        let mut env = Environment::new();
        let first = Value::Intrinsic(env.alloc_intrinsic(Intrinsic::ToStr));
        let second = Value::Intrinsic(env.alloc_intrinsic(Intrinsic::ToStr));
        assert_eq!(
            binary(first.clone(), BinaryOp::Eq, first.clone()),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(first.clone(), BinaryOp::Eq, second.clone()),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(first, BinaryOp::NotEq, second),
            Value::Boolean(true)
        );
    }
}

mod ordering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_and_strings() {
        assert_eq!(
            binary(num(1.0), BinaryOp::Lt, num(2.0)),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(num(2.0), BinaryOp::LtEq, num(2.0)),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(num(2.0), BinaryOp::Gt, num(2.0)),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(Value::string("b"), BinaryOp::GtEq, Value::string("a")),
            Value::Boolean(true)
        );
    }

    #[test]
    fn void_orders_both_ways() {
        assert_eq!(
            binary(Value::Void, BinaryOp::LtEq, num(1.0)),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(Value::Void, BinaryOp::GtEq, num(1.0)),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(Value::Void, BinaryOp::Lt, num(1.0)),
            Value::Boolean(false)
        );
        assert_eq!(
            binary(num(1.0), BinaryOp::Gt, Value::Void),
            Value::Boolean(false)
        );
    }

    #[test]
    fn strict_operators_negate_the_opposite_bound() {
        // `<` is `!(>=)`, so NaN is less than anything.
        assert_eq!(
            binary(num(f64::NAN), BinaryOp::Lt, num(1.0)),
            Value::Boolean(true)
        );
        assert_eq!(
            binary(num(f64::NAN), BinaryOp::LtEq, num(1.0)),
            Value::Boolean(false)
        );
    }

    #[test]
    fn number_against_string_is_incomparable() {
        assert_eq!(
            binary_error(num(1.0), BinaryOp::Lt, Value::string("1")),
            EvalErrorKind::Incomparable {
                op: BinaryOp::Lt,
                left: "number".to_string(),
                right: "string".to_string(),
            }
        );
    }

    #[test]
    fn booleans_and_intrinsics_are_unorderable() {
        assert!(matches!(
            binary_error(Value::Boolean(true), BinaryOp::Gt, Value::Boolean(false)),
            EvalErrorKind::Unorderable { .. }
        ));
        assert!(matches!(
            binary_error(
                intrinsic(Intrinsic::Err),
                BinaryOp::LtEq,
                num(1.0)
            ),
            EvalErrorKind::Unorderable { .. }
        ));
    }
}

mod unary {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negation() {
        assert_eq!(evaluate_unary(num(2.0), UnaryOp::Neg), Ok(num(-2.0)));
        assert_eq!(
            evaluate_unary(Value::string("x"), UnaryOp::Neg).map_err(|e| e.kind),
            Err(EvalErrorKind::NegationOfNonNumber {
                kind: "string".to_string()
            })
        );
    }

    #[test]
    fn logical_not_uses_truthiness() {
        assert_eq!(
            evaluate_unary(num(0.0), UnaryOp::Not),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            evaluate_unary(Value::string("x"), UnaryOp::Not),
            Ok(Value::Boolean(false))
        );
        assert!(evaluate_unary(Value::Void, UnaryOp::Not).is_err());
    }
}

mod truthiness {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_strings_booleans() {
        assert_eq!(is_truthy(&num(1.0)), Ok(true));
        assert_eq!(is_truthy(&num(-0.0)), Ok(false));
        assert_eq!(is_truthy(&num(f64::NAN)), Ok(true));
        assert_eq!(is_truthy(&Value::string("")), Ok(false));
        assert_eq!(is_truthy(&Value::string("0")), Ok(true));
        assert_eq!(is_truthy(&Value::Boolean(false)), Ok(false));
    }

    #[test]
    fn other_kinds_have_no_truthiness() {
        assert_eq!(
            is_truthy(&Value::Void).map_err(|e| e.kind),
            Err(EvalErrorKind::NotTruthy {
                kind: "void".to_string()
            })
        );
        assert!(is_truthy(&intrinsic(Intrinsic::ToStr)).is_err());
    }
}
