//! End-to-end tests: surface module in, printed lines out.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tarn_ir::surface::{Expr as S, Global, Module, Stmt};
use tarn_ir::{ArithmeticOp, CompareOp, StringInterner};
use tarnc::{
    buffer_handler, callback_handler, compile_and_run, CompileErrorKind, EvalErrorKind, RunError,
};

fn run(interner: &StringInterner, globals: Vec<Global>) -> (Result<(), RunError>, String) {
    let handler = buffer_handler();
    let result = compile_and_run(&Module { globals }, interner, handler.clone());
    (result, handler.get_output())
}

fn main(body: Vec<Stmt>) -> Global {
    Global::Main {
        body: S::Procedure(body),
    }
}

fn name(interner: &StringInterner, text: &str) -> S {
    S::name(interner.intern(text))
}

#[test]
fn prints_follow_statement_order() {
    let interner = StringInterner::new();
    let body = (1..=6)
        .map(|n| Stmt::Print(S::number(f64::from(n))))
        .collect();
    let (result, out) = run(&interner, vec![main(body)]);
    result.unwrap();
    assert_eq!(out, "1\n2\n3\n4\n5\n6\n");
}

#[test]
fn loop_with_break_prints_once() {
    let interner = StringInterner::new();
    let (result, out) = run(
        &interner,
        vec![main(vec![Stmt::Forever(Box::new(Stmt::Do(S::Procedure(
            vec![Stmt::Print(S::number(1.0)), Stmt::Break],
        ))))])],
    );
    result.unwrap();
    assert_eq!(out, "1\n");
}

#[test]
fn self_referential_stream() {
    let interner = StringInterner::new();
    let xs = || name(&interner, "xs");
    let nth = |n: usize| {
        (0..n).fold(xs(), |s, _| S::accessor(s, S::number(1.0)))
    };
    let globals = vec![
        Global::Define {
            name: interner.intern("xs"),
            value: S::Tuple(vec![S::number(1.0), xs()]),
        },
        main(
            (0..3)
                .map(|n| Stmt::Print(S::accessor(nth(n), S::number(0.0))))
                .collect(),
        ),
    ];
    let (result, out) = run(&interner, globals);
    result.unwrap();
    assert_eq!(out, "1\n1\n1\n");
}

#[test]
fn void_equality_and_kind_mismatch() {
    let interner = StringInterner::new();
    let (result, out) = run(
        &interner,
        vec![main(vec![
            Stmt::Print(S::compare(CompareOp::Eq, S::Void, S::number(5.0))),
            Stmt::Print(S::compare(
                CompareOp::Eq,
                S::number(5.0),
                S::String(interner.intern("5")),
            )),
        ])],
    );
    result.unwrap();
    assert_eq!(out, "true\nfalse\n");
}

#[test]
fn ordering_closures_is_a_runtime_error() {
    let interner = StringInterner::new();
    let id = || S::closure(vec![interner.intern("x")], name(&interner, "x"));
    let (result, out) = run(
        &interner,
        vec![main(vec![
            Stmt::Print(S::number(0.0)),
            Stmt::Print(S::compare(CompareOp::Lt, id(), id())),
        ])],
    );
    assert_eq!(out, "0\n");
    let Err(RunError::Eval(err)) = result else {
        panic!("expected an evaluation error, got {result:?}");
    };
    assert!(matches!(err.kind, EvalErrorKind::Unorderable { .. }));
}

#[test]
fn hole_fails_before_anything_runs() {
    let interner = StringInterner::new();
    let (result, out) = run(
        &interner,
        vec![main(vec![Stmt::Print(S::number(1.0)), Stmt::Hole])],
    );
    assert_eq!(out, "");
    let Err(RunError::Compile(err)) = result else {
        panic!("expected a compile error, got {result:?}");
    };
    assert!(matches!(err.kind, CompileErrorKind::EncounteredHole { .. }));
    assert_eq!(err.definition.as_deref(), Some("__start"));
}

#[test]
fn callback_sink_receives_each_print() {
    let interner = StringInterner::new();
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let handler = callback_handler(move |line| sink.lock().push(line.to_string()));

    let module = Module {
        globals: vec![main(vec![
            Stmt::Print(S::String(interner.intern("a"))),
            Stmt::Print(S::arithmetic(
                ArithmeticOp::Div,
                S::number(1.0),
                S::number(4.0),
            )),
        ])],
    };
    compile_and_run(&module, &interner, handler).unwrap();

    assert_eq!(*lines.lock(), vec!["a".to_string(), "0.25".to_string()]);
}

#[test]
fn run_error_display_names_the_phase() {
    let interner = StringInterner::new();
    let (result, _) = run(&interner, vec![main(vec![Stmt::Print(name(&interner, "nope"))])]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "runtime error: unbound name: nope"
    );
}
