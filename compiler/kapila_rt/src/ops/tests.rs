#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;
use crate::config::RuntimeConfig;
use crate::print_handler::buffer_handler;
use crate::value::Value;

fn session() -> Session {
    Session::with_output(RuntimeConfig::default(), buffer_handler())
}

fn run(s: &mut Session, words: &str) -> RuntimeResult<()> {
    for word in words.split_whitespace() {
        match word.parse::<i64>() {
            Ok(n) => s.push_int(n)?,
            Err(_) => s.execute_word(word)?,
        }
    }
    Ok(())
}

#[test]
fn canonical_names_resolve_to_their_op() {
    for op in Op::ALL {
        match lookup_word(op.name()) {
            Some(Word::Op(found)) => assert_eq!(found, op),
            Some(Word::Bool(b)) => assert!(matches!(op, Op::True | Op::False), "{op:?} -> {b}"),
            None => panic!("{op:?} has no word"),
        }
    }
}

#[test]
fn names_are_unique() {
    let mut names: Vec<_> = Op::ALL.iter().map(|op| op.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Op::ALL.len());
}

#[test]
fn kannada_aliases_match_english_words() {
    let pairs = [
        ("ಕೂಡು", "+"),
        ("ಕಳೆ", "-"),
        ("ಗುಣಿಸು", "*"),
        ("ಭಾಗಿಸು", "/"),
        ("ಶೇಷ", "%"),
        ("ಸಮ", "="),
        ("ಸಮನಲ್ಲ", "!="),
        ("ಕಿರಿದು", "<"),
        ("ಹಿರಿದು", ">"),
        ("ಕಿರಿದುಸಮ", "<="),
        ("ಹಿರಿದುಸಮ", ">="),
        ("ಮತ್ತು", "and"),
        ("ಅಥವಾ", "or"),
        ("ಅಲ್ಲ", "not"),
        ("ನಕಲು", "dup"),
        ("ಬಿಡು", "drop"),
        ("ಅದಲುಬದಲು", "swap"),
        ("ಮೇಲೆ", "over"),
        ("ತಿರುಗಿಸು", "rot"),
        ("ಮುದ್ರಿಸು", "print"),
        ("ಉದ್ದ", "length"),
        ("ತೆಗೆ", "nth"),
        ("ಸೇರಿಸು", "append"),
        ("ಮೊದಲ", "first"),
        ("ಉಳಿದ", "rest"),
        ("ಜೋಡಿಸು", ","),
        ("≠", "!="),
        ("≤", "<="),
        ("≥", ">="),
    ];
    for (alias, english) in pairs {
        assert_eq!(lookup_word(alias), lookup_word(english), "{alias}");
        assert!(matches!(lookup_word(alias), Some(Word::Op(_))), "{alias}");
    }
}

#[test]
fn boolean_words() {
    for word in ["true", "ನಿಜ", "ಸರಿ", "ಹೌದು"] {
        assert_eq!(lookup_word(word), Some(Word::Bool(true)), "{word}");
    }
    for word in ["false", "ಸುಳ್ಳು", "ತಪ್ಪು", "ಬೇಸ", "ಇಲ್ಲ"] {
        assert_eq!(lookup_word(word), Some(Word::Bool(false)), "{word}");
    }
}

#[test]
fn unknown_words() {
    assert_eq!(lookup_word("map"), None);
    let mut s = session();
    assert_eq!(
        s.execute_word("frobnicate"),
        Err(RuntimeError::UnknownWord("frobnicate".to_string()))
    );
    assert!(!s.is_aborted());
}

#[test]
fn arity_matches_behaviour() {
    let mut s = session();
    run(&mut s, "1 2 3").unwrap();
    for op in [Op::Dup, Op::Over, Op::Swap, Op::Rot, Op::Add, Op::Neg, Op::Drop] {
        let (consumed, produced) = op.arity();
        let before = s.depth();
        s.execute(op).unwrap();
        assert_eq!(s.depth() + consumed, before + produced, "{op:?}");
    }
}

#[test]
fn execute_checks_depth_before_dispatch() {
    let mut s = session();
    s.push_int(1).unwrap();
    assert_eq!(
        s.execute(Op::Add),
        Err(RuntimeError::StackUnderflow { needed: 2, depth: 1 })
    );
    assert_eq!(s.values(), &[Value::Int(1)]);
    assert!(s.is_aborted());
    assert_eq!(s.execute(Op::Dup), Err(RuntimeError::SessionAborted));
    assert_eq!(s.execute_word("dup"), Err(RuntimeError::SessionAborted));
}

#[test]
fn kannada_program() {
    let mut s = session();
    run(&mut s, "5 3 ಕೂಡು ನಕಲು ಗುಣಿಸು ಮುದ್ರಿಸು").unwrap();
    assert_eq!(s.output().captured(), "64");
}

#[test]
fn literal_words_push_booleans() {
    let mut s = session();
    run(&mut s, "ನಿಜ ಇಲ್ಲ or print").unwrap();
    s.execute(Op::False).unwrap();
    s.execute(Op::True).unwrap();
    assert_eq!(s.output().captured(), "ಸರಿ");
    assert_eq!(s.values(), &[Value::Bool(false), Value::Bool(true)]);
}

#[test]
fn list_words() {
    let mut s = session();
    run(&mut s, "list 1 append 2 append 3 append dup length println rest println").unwrap();
    assert_eq!(s.output().captured(), "3\n[2 3]\n");
}

#[test]
fn every_op_dispatches() {
    let mut s = session();
    s.push_literal("abc").unwrap();
    s.execute(Op::StrLen).unwrap();
    s.push_literal("x").unwrap();
    s.push_literal("y").unwrap();
    s.execute(Op::StrConcat).unwrap();
    s.push_int(0).unwrap();
    s.execute(Op::StrAt).unwrap();
    s.execute(Op::ShowStack).unwrap();
    assert_eq!(s.output().take(), "Stack: [3 x]\n");

    run(&mut s, "drop drop 7 2 % 7 2 / 3 ≥ 3 4 != and").unwrap();
    s.execute(Op::Print).unwrap();
    assert_eq!(s.output().take(), "ಸರಿ");
    assert_eq!(s.values(), &[Value::Int(1)]);
}

#[test]
fn errors_name_operators_by_their_canonical_word() {
    use crate::operators::BinaryOp;

    let pairs = [
        (Op::Add, BinaryOp::Add),
        (Op::Sub, BinaryOp::Sub),
        (Op::Mul, BinaryOp::Mul),
        (Op::Div, BinaryOp::Div),
        (Op::Mod, BinaryOp::Mod),
        (Op::Lt, BinaryOp::Lt),
        (Op::Gt, BinaryOp::Gt),
        (Op::Lte, BinaryOp::Lte),
        (Op::Gte, BinaryOp::Gte),
        (Op::Eq, BinaryOp::Eq),
        (Op::And, BinaryOp::And),
        (Op::Or, BinaryOp::Or),
    ];
    for (op, binary) in pairs {
        assert_eq!(binary.symbol(), op.name(), "{op:?}");
    }

    // Aliases report the canonical word too.
    let mut s = session();
    s.push_float(7.5).unwrap();
    s.push_int(2).unwrap();
    assert!(matches!(
        s.execute_word("mod"),
        Err(RuntimeError::TypeMismatch { op: "%", .. })
    ));
    s.push_literal("a").unwrap();
    assert!(matches!(
        s.execute_word("≠"),
        Err(RuntimeError::TypeMismatch { op: "!=", .. })
    ));
}
