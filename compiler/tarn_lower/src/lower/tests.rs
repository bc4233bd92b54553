use super::*;
use crate::CompileErrorKind;
use pretty_assertions::assert_eq;
use tarn_ir::surface::{Expr as S, Stmt};
use tarn_ir::{abstract_ast::pretty, ArithmeticOp, CompareOp, UnaryOp};

fn lower_to_string(interner: &StringInterner, expr: &S) -> String {
    let mut lowerer = Lowerer::new(interner);
    let root = lowerer.lower_expr(expr).unwrap_or_else(|e| panic!("{e}"));
    pretty(&lowerer.arena, root, interner)
}

fn name(interner: &StringInterner, text: &str) -> S {
    S::name(interner.intern(text))
}

#[test]
fn literals_pass_through() {
    let interner = StringInterner::new();
    assert_eq!(lower_to_string(&interner, &S::number(4.0)), "4");
    assert_eq!(lower_to_string(&interner, &S::Boolean(false)), "false");
    assert_eq!(lower_to_string(&interner, &S::Void), "∅");
    assert_eq!(
        lower_to_string(&interner, &S::String(interner.intern("hi"))),
        "\"hi\""
    );
}

#[test]
fn arithmetic_and_compare_become_binary_ops() {
    let interner = StringInterner::new();
    let expr = S::compare(
        CompareOp::Gt,
        S::arithmetic(ArithmeticOp::Mul, name(&interner, "a"), S::number(2.0)),
        S::unary(UnaryOp::Neg, S::number(1.0)),
    );
    assert_eq!(lower_to_string(&interner, &expr), "(> (* a 2) (- 1))");
}

#[test]
fn call_folds_last_argument_innermost() {
    let interner = StringInterner::new();
    let expr = S::call(
        name(&interner, "f"),
        vec![name(&interner, "a"), name(&interner, "b")],
    );
    assert_eq!(lower_to_string(&interner, &expr), "((f b) a)");
}

#[test]
fn nullary_call() {
    let interner = StringInterner::new();
    let expr = S::call(name(&interner, "f"), vec![]);
    assert_eq!(lower_to_string(&interner, &expr), "(f)");
}

#[test]
fn closure_curries_last_parameter_outermost() {
    let interner = StringInterner::new();
    let params = vec![interner.intern("a"), interner.intern("b")];
    let expr = S::closure(params, name(&interner, "a"));
    assert_eq!(lower_to_string(&interner, &expr), "λb.λa.a");
}

#[test]
fn nullary_closure() {
    let interner = StringInterner::new();
    let expr = S::closure(vec![], S::number(7.0));
    assert_eq!(lower_to_string(&interner, &expr), "λ.7");
}

#[test]
fn list_becomes_cons_cells() {
    let interner = StringInterner::new();
    let expr = S::List(vec![S::number(1.0), S::number(2.0)]);
    assert_eq!(lower_to_string(&interner, &expr), "[1 [2 ∅]]");
    assert_eq!(lower_to_string(&interner, &S::List(vec![])), "∅");
}

#[test]
fn tuple_and_if_are_structural() {
    let interner = StringInterner::new();
    let expr = S::if_(
        S::Boolean(true),
        S::Tuple(vec![S::number(1.0), S::Void]),
        S::accessor(name(&interner, "t"), S::number(0.0)),
    );
    assert_eq!(lower_to_string(&interner, &expr), "(true ? [1 ∅] : t[0])");
}

#[test]
fn with_applies_the_fixed_point() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let expr = S::with(x, S::number(1.0), S::name(x));
    assert_eq!(
        lower_to_string(&interner, &expr),
        "(λx.x (λf.(λx.(x x) λx.(f (x x))) λx.1))"
    );
}

#[test]
fn empty_procedure_hands_world_to_continuation() {
    let interner = StringInterner::new();
    assert_eq!(
        lower_to_string(&interner, &S::Procedure(vec![])),
        "λ__k.λ__world.(__k __world)"
    );
}

#[test]
fn print_resumes_through_the_intrinsic_result() {
    let interner = StringInterner::new();
    let expr = S::Procedure(vec![Stmt::Print(S::number(1.0))]);
    assert_eq!(
        lower_to_string(&interner, &expr),
        "λ__k.λ__world.((__core.print_stmt 1) ((λ__k.λ__world.(__k __world) __k) __world))"
    );
}

#[test]
fn break_calls_the_captured_exit() {
    let interner = StringInterner::new();
    let expr = S::Procedure(vec![Stmt::Break]);
    assert_eq!(
        lower_to_string(&interner, &expr),
        "λ__k.λ__world.(__break __world)"
    );
}

#[test]
fn do_passes_a_resuming_continuation() {
    let interner = StringInterner::new();
    let expr = S::Procedure(vec![Stmt::Do(name(&interner, "p"))]);
    assert_eq!(
        lower_to_string(&interner, &expr),
        "λ__k.λ__world.((p λ__world.((λ__k.λ__world.(__k __world) __k) __world)) __world)"
    );
}

#[test]
fn if_without_else_falls_through_to_next() {
    let interner = StringInterner::new();
    let expr = S::Procedure(vec![Stmt::If {
        condition: name(&interner, "c"),
        body: Box::new(Stmt::Pass),
        else_: None,
    }]);
    let lowered = lower_to_string(&interner, &expr);
    assert!(lowered.contains("(c ? "), "{lowered}");
    assert!(
        lowered.ends_with(
            ": (__next __world)) λ__world.((λ__k.λ__world.(__k __world) __k) __world))"
        ),
        "{lowered}"
    );
}

#[test]
fn expression_statement_forces_its_value_then_resumes() {
    let interner = StringInterner::new();
    let effect = S::call(name(&interner, "f"), vec![S::number(1.0)]);
    let expr = S::Procedure(vec![Stmt::Expression(effect)]);
    let lowered = lower_to_string(&interner, &expr);
    assert!(
        lowered.starts_with(
            "λ__k.λ__world.(λ__next.((__core.is_void (f 1)) ? (__next __world) : (__next __world))"
        ),
        "{lowered}"
    );
    assert!(
        lowered.ends_with("λ__world.((λ__k.λ__world.(__k __world) __k) __world))"),
        "{lowered}"
    );
    assert_eq!(lowered.matches("(f 1)").count(), 1, "{lowered}");
}

#[test]
fn loops_bind_break_and_recurse_through_loop() {
    let interner = StringInterner::new();
    let forever = lower_to_string(
        &interner,
        &S::Procedure(vec![Stmt::Forever(Box::new(Stmt::Break))]),
    );
    assert!(forever.contains("λ__break."), "{forever}");
    assert!(forever.contains("λ__loop."), "{forever}");
    assert!(forever.contains("λ__continue."), "{forever}");

    let for_in = lower_to_string(
        &interner,
        &S::Procedure(vec![Stmt::ForIn {
            binding: interner.intern("item"),
            value: name(&interner, "xs"),
            body: Box::new(Stmt::Print(name(&interner, "item"))),
        }]),
    );
    assert!(for_in.contains("((__core.is_void __iter) ? (__break __world)"), "{for_in}");
    assert!(for_in.contains("λitem."), "{for_in}");
    assert!(for_in.contains("__iter[0]"), "{for_in}");
    assert!(for_in.contains("__iter[1]"), "{for_in}");
}

#[test]
fn hole_inside_expression_fails() {
    let interner = StringInterner::new();
    let mut lowerer = Lowerer::new(&interner);
    let err = lowerer
        .lower_expr(&S::Tuple(vec![S::number(1.0), S::Hole]))
        .unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::EncounteredHole {
            context: HoleContext::Expression
        }
    );
}

#[test]
fn hole_statement_inside_nested_block_fails() {
    let interner = StringInterner::new();
    let mut lowerer = Lowerer::new(&interner);
    let nested = S::Procedure(vec![Stmt::Forever(Box::new(Stmt::Hole))]);
    let err = lowerer.lower_expr(&nested).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::EncounteredHole {
            context: HoleContext::Statement
        }
    );
}

#[test]
fn deeply_nested_expression_lowers() {
    let interner = StringInterner::new();
    let mut expr = S::number(0.0);
    for _ in 0..50_000 {
        expr = S::arithmetic(ArithmeticOp::Add, expr, S::number(1.0));
    }
    let mut lowerer = Lowerer::new(&interner);
    assert!(lowerer.lower_expr(&expr).is_ok());
    // Dropping a deeply nested Box tree recurses too; leak it instead.
    std::mem::forget(expr);
}
