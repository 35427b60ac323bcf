#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;
use crate::config::RuntimeConfig;
use crate::print_handler::silent_handler;

fn session() -> Session {
    Session::with_output(RuntimeConfig::default(), silent_handler())
}

fn sentinel_session() -> Session {
    let config = RuntimeConfig::default().with_index_policy(IndexPolicy::Sentinel);
    Session::with_output(config, silent_handler())
}

fn top_str(s: &Session) -> String {
    match s.values().last() {
        Some(Value::Str(text)) => s.str_value(*text).unwrap().to_string(),
        other => panic!("expected a string on top, got {other:?}"),
    }
}

/// Push a list holding `items`.
fn push_list_of(s: &mut Session, items: &[i64]) {
    s.list_new().unwrap();
    for &n in items {
        s.push_int(n).unwrap();
        s.list_push().unwrap();
    }
}

mod strings {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn kannada_length_is_codepoints() {
        let mut s = session();
        s.push_str("ಕನ್ನಡಕ").unwrap();
        s.str_len().unwrap();
        assert_eq!(s.values(), &[Value::Int(6)]);
    }

    #[test]
    fn concat_allocates_a_new_string() {
        let mut s = session();
        s.push_literal("ಕಪಿಲ").unwrap();
        s.push_str(" runtime").unwrap();
        s.str_concat().unwrap();
        assert_eq!(top_str(&s), "ಕಪಿಲ runtime");
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn concat_rejects_non_strings() {
        let mut s = session();
        s.push_literal("a").unwrap();
        s.push_int(1).unwrap();
        assert!(matches!(
            s.str_concat(),
            Err(RuntimeError::TypeMismatch { op: ",", .. })
        ));
        assert_eq!(s.depth(), 2);
    }

    #[test]
    fn char_at_walks_codepoints() {
        let mut s = session();
        // ಕ ಪ ◌ಿ ಲ
        s.push_literal("\u{c95}\u{caa}\u{cbf}\u{cb2}").unwrap();
        s.push_int(2).unwrap();
        s.str_at().unwrap();
        assert_eq!(top_str(&s), "\u{cbf}");
    }

    #[test]
    fn char_at_out_of_range_is_empty() {
        for index in [-1, 3, 100] {
            let mut s = sentinel_session();
            s.push_literal("abc").unwrap();
            s.push_int(index).unwrap();
            s.str_at().unwrap();
            assert_eq!(top_str(&s), "", "index {index}");
        }

        // Strict indexing does not apply to strings.
        let mut s = session();
        s.push_literal("abc").unwrap();
        s.push_int(3).unwrap();
        s.str_at().unwrap();
        assert_eq!(top_str(&s), "");
    }

    #[test]
    fn str_len_rejects_lists() {
        let mut s = session();
        s.list_new().unwrap();
        assert!(s.str_len().is_err());
        assert_eq!(s.depth(), 1);
    }
}

mod lists {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn push_len_and_at() {
        let mut s = session();
        push_list_of(&mut s, &[10, 20, 30]);
        s.dup().unwrap();
        s.list_len().unwrap();
        assert_eq!(s.pop().unwrap(), Value::Int(3));

        s.push_int(1).unwrap();
        s.list_at().unwrap();
        assert_eq!(s.values(), &[Value::Int(20)]);
    }

    #[test]
    fn order_survives_growth() {
        let mut s = session();
        let items: Vec<i64> = (0..20).collect();
        push_list_of(&mut s, &items);
        let Value::List(id) = s.peek().unwrap() else {
            panic!("expected a list");
        };
        assert_eq!(s.arena().list_capacity(id).unwrap(), 32);
        let stored: Vec<i64> = s
            .arena()
            .list_items(id)
            .unwrap()
            .iter()
            .filter_map(Value::as_int)
            .collect();
        assert_eq!(stored, items);
    }

    #[test]
    fn first_and_rest() {
        let mut s = session();
        push_list_of(&mut s, &[1, 2, 3]);
        s.dup().unwrap();
        s.list_first().unwrap();
        assert_eq!(s.pop().unwrap(), Value::Int(1));

        s.list_rest().unwrap();
        let top = s.peek().unwrap();
        assert_eq!(s.display(top).unwrap(), "[2 3]");
    }

    #[test]
    fn rest_of_short_lists_is_empty() {
        for items in [&[][..], &[9][..]] {
            let mut s = session();
            push_list_of(&mut s, items);
            s.list_rest().unwrap();
            s.list_len().unwrap();
            assert_eq!(s.values(), &[Value::Int(0)]);
        }
    }

    #[test]
    fn rest_does_not_modify_the_original() {
        let mut s = session();
        push_list_of(&mut s, &[1, 2]);
        s.dup().unwrap();
        s.list_rest().unwrap();
        s.drop_top().unwrap();
        let top = s.peek().unwrap();
        assert_eq!(s.display(top).unwrap(), "[1 2]");
    }

    #[test]
    fn strict_indexing_reports_out_of_range() {
        let mut s = session();
        push_list_of(&mut s, &[1, 2]);
        s.push_int(5).unwrap();
        assert_eq!(
            s.list_at(),
            Err(RuntimeError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(s.depth(), 2);
        assert!(!s.is_aborted());

        s.drop_top().unwrap();
        s.push_int(-1).unwrap();
        assert_eq!(
            s.list_at(),
            Err(RuntimeError::IndexOutOfRange { index: -1, len: 2 })
        );
    }

    #[test]
    fn strict_first_on_empty() {
        let mut s = session();
        s.list_new().unwrap();
        assert_eq!(
            s.list_first(),
            Err(RuntimeError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn sentinel_indexing_yields_zero() {
        let mut s = sentinel_session();
        push_list_of(&mut s, &[1, 2]);
        s.push_int(5).unwrap();
        s.list_at().unwrap();
        assert_eq!(s.pop().unwrap(), Value::Int(0));

        s.list_new().unwrap();
        s.list_first().unwrap();
        assert_eq!(s.pop().unwrap(), Value::Int(0));
    }

    #[test]
    fn length_accepts_strings() {
        let mut s = session();
        s.push_literal("ಕಪಿಲ").unwrap();
        s.list_len().unwrap();
        assert_eq!(s.values(), &[Value::Int(4)]);
    }

    #[test]
    fn list_ops_reject_other_types() {
        let mut s = session();
        s.push_int(1).unwrap();
        s.push_int(2).unwrap();
        assert!(matches!(
            s.list_push(),
            Err(RuntimeError::TypeMismatch { op: "append", .. })
        ));
        assert!(matches!(
            s.list_rest(),
            Err(RuntimeError::TypeMismatch { op: "rest", .. })
        ));
        assert_eq!(s.depth(), 2);
    }

    #[test]
    fn index_must_be_an_integer() {
        let mut s = session();
        push_list_of(&mut s, &[1]);
        s.push_float(0.0).unwrap();
        assert!(matches!(
            s.list_at(),
            Err(RuntimeError::TypeMismatch { op: "nth", .. })
        ));
    }

    #[test]
    fn list_new_on_full_stack_does_not_allocate() {
        let config = RuntimeConfig::default().with_stack_capacity(0);
        let mut s = Session::with_output(config, silent_handler());
        assert_eq!(s.list_new(), Err(RuntimeError::StackOverflow { capacity: 0 }));
        assert_eq!(s.arena().allocation_count(), 0);
    }

    #[test]
    fn growth_past_the_allocation_limit_is_fatal() {
        // list record + first buffer
        let config = RuntimeConfig::default().with_allocation_limit(2);
        let mut s = Session::with_output(config, silent_handler());
        push_list_of(&mut s, &[0, 1, 2, 3, 4, 5, 6, 7]);
        s.push_int(8).unwrap();
        assert_eq!(
            s.list_push(),
            Err(RuntimeError::AllocationLimitExceeded { limit: 2 })
        );
        assert!(s.is_aborted());
    }
}
