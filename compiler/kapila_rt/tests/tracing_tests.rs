//! Logging setup, in its own test binary so the environment and the
//! global subscriber are not shared with other tests.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use kapila_rt::{buffer_handler, init_tracing, RuntimeConfig, RuntimeError, Session};
use pretty_assertions::assert_eq;

#[test]
fn init_tracing_is_repeatable_and_sessions_log_through_it() {
    std::env::set_var("RUST_LOG", "kapila_rt=trace");
    init_tracing();
    init_tracing();

    let mut s = Session::with_output(RuntimeConfig::default(), buffer_handler());
    s.push_str("logged").unwrap();
    s.println().unwrap();
    assert_eq!(s.output().captured(), "logged\n");

    // Fatal errors are logged and still reported.
    assert_eq!(
        s.pop(),
        Err(RuntimeError::StackUnderflow { needed: 1, depth: 0 })
    );
    assert!(s.is_aborted());
    s.cleanup();
    init_tracing();
}
