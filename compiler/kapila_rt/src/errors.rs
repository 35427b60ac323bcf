//! Runtime error taxonomy.
//!
//! Errors split into two classes:
//!
//! - **Fatal**: stack capacity violations, arena exhaustion and stale
//!   handles. The session that raised one is aborted and refuses further
//!   operations until it is re-initialised.
//! - **Recoverable**: type mismatches, strict indexing failures, cycles in
//!   printed lists and unknown words. The failing operation leaves the
//!   evaluation stack untouched and the session continues.
//!
//! File I/O failures are not errors at this level: `read_file` and
//! `write_file` report them through their result value.

use thiserror::Error;

/// Result alias used throughout the runtime.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Every failure an operation can report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("stack underflow: needed {needed} operand(s), depth is {depth}")]
    StackUnderflow { needed: usize, depth: usize },

    #[error("stack overflow: capacity of {capacity} values exceeded")]
    StackOverflow { capacity: usize },

    #[error("arena allocation limit of {limit} exceeded")]
    AllocationLimitExceeded { limit: usize },

    #[error("type mismatch in `{op}`: expected {expected}, got {got}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("cannot print a list that contains itself")]
    CycleDetected,

    #[error("handle refers to memory released by an earlier session")]
    StaleHandle,

    #[error("unknown word `{0}`")]
    UnknownWord(String),

    #[error("session aborted by an earlier fatal error")]
    SessionAborted,
}

impl RuntimeError {
    /// Whether this error aborts the session that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::StackUnderflow { .. }
                | Self::StackOverflow { .. }
                | Self::AllocationLimitExceeded { .. }
                | Self::StaleHandle
                | Self::SessionAborted
        )
    }
}

/// Type mismatch for an operation on a single operand.
#[cold]
pub fn type_mismatch(op: &'static str, expected: &'static str, got: &str) -> RuntimeError {
    RuntimeError::TypeMismatch {
        op,
        expected,
        got: got.to_string(),
    }
}

/// Type mismatch for a binary operation, naming both operand types.
#[cold]
pub fn binary_type_mismatch(
    op: &'static str,
    expected: &'static str,
    left: &str,
    right: &str,
) -> RuntimeError {
    RuntimeError::TypeMismatch {
        op,
        expected,
        got: format!("{left} and {right}"),
    }
}
