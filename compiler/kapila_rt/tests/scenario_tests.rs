//! End-to-end scenarios driven the way generated code drives a session.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kapila_rt::{buffer_handler, Op, RuntimeConfig, RuntimeError, Session, Value};
use pretty_assertions::assert_eq;

fn session() -> Session {
    Session::with_output(RuntimeConfig::default(), buffer_handler())
}

#[test]
fn add_and_print() {
    let mut s = session();
    s.push_int(5).unwrap();
    s.push_int(3).unwrap();
    s.add().unwrap();
    s.print().unwrap();
    assert_eq!(s.output().captured(), "8");
}

#[test]
fn divide_and_print() {
    let mut s = session();
    s.push_int(10).unwrap();
    s.push_int(3).unwrap();
    s.div().unwrap();
    s.print().unwrap();
    assert_eq!(s.output().captured(), "3.33333");
}

#[test]
fn exact_division_is_still_float() {
    let mut s = session();
    s.push_int(4).unwrap();
    s.push_int(2).unwrap();
    s.div().unwrap();
    assert_eq!(s.values(), &[Value::Float(2.0)]);
}

#[test]
fn logic_and_print() {
    let mut s = session();
    s.push_bool(true).unwrap();
    s.push_bool(false).unwrap();
    s.and().unwrap();
    s.print().unwrap();
    assert_eq!(s.output().captured(), s.config().bool_literals.false_word);
}

#[test]
fn empty_pop_underflows() {
    let mut s = session();
    assert_eq!(
        s.pop(),
        Err(RuntimeError::StackUnderflow { needed: 1, depth: 0 })
    );
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let path = path.to_str().expect("temp paths are UTF-8");

    let mut s = session();
    s.push_str(path).unwrap();
    s.push_literal("hello").unwrap();
    s.execute(Op::WriteFile).unwrap();
    assert!(s.pop_condition().unwrap());

    s.push_str(path).unwrap();
    s.execute(Op::ReadFile).unwrap();
    s.execute(Op::Println).unwrap();
    assert_eq!(s.output().captured(), "hello\n");
}

#[test]
fn countdown_loop() {
    // n = 3; while n > 0 { print n; n = n - 1 }
    let mut s = session();
    s.push_int(3).unwrap();
    loop {
        s.dup().unwrap();
        s.push_int(0).unwrap();
        s.gt().unwrap();
        if !s.pop_condition().unwrap() {
            break;
        }
        s.dup().unwrap();
        s.println().unwrap();
        s.push_int(1).unwrap();
        s.sub().unwrap();
    }
    assert_eq!(s.output().captured(), "3\n2\n1\n");
    assert_eq!(s.values(), &[Value::Int(0)]);
    s.cleanup();
}

#[test]
fn nested_lists_print_recursively() {
    let mut s = session();
    for word in "list 1 append list 2 append 3 append append ಮುದ್ರಿಸು".split_whitespace() {
        match word.parse::<i64>() {
            Ok(n) => s.push_int(n).unwrap(),
            Err(_) => s.execute_word(word).unwrap(),
        }
    }
    assert_eq!(s.output().captured(), "[1 [2 3]]");
}

#[test]
fn reinitialised_session_is_reusable() {
    let mut s = session();
    assert!(s.execute(Op::Drop).is_err());
    assert_eq!(s.push_int(1), Err(RuntimeError::SessionAborted));
    s.init();
    s.push_int(2).unwrap();
    s.push_int(2).unwrap();
    s.execute(Op::Mul).unwrap();
    s.execute(Op::Print).unwrap();
    assert_eq!(s.output().captured(), "4");
}
