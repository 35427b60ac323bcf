//! Kapila runtime library.
//!
//! Support code for compiled Kapila programs. Generated code drives a
//! [`Session`] through zero-argument operations that read and write its
//! evaluation stack.
//!
//! # Components
//!
//! - **Values**: [`Value`], a small `Copy` sum of Integer, Float, Boolean,
//!   String and List.
//! - **Stack**: [`EvalStack`], fixed capacity, checked on every access.
//! - **Memory**: [`Arena`], a session-scoped region released in one step.
//! - **Operations**: arithmetic, comparison, logic, stack manipulation,
//!   codepoint-indexed strings, growable lists, printing and whole-file I/O.
//! - **Vocabulary**: [`Op`] and [`lookup_word`], covering English, symbolic
//!   and Kannada spellings.
//!
//! # Errors
//!
//! Every operation returns [`RuntimeResult`]. Fatal errors abort the
//! session; recoverable ones leave the stack untouched. See
//! [`RuntimeError::is_fatal`].

mod arena;
mod collections;
mod config;
mod errors;
mod format;
mod io;
mod list;
mod operators;
mod ops;
mod print_handler;
mod session;
mod stack;
mod string;
mod unary_operators;
mod value;

use std::sync::Once;

pub use arena::Arena;
pub use config::{
    BoolLiterals, IndexPolicy, RuntimeConfig, DEFAULT_ALLOCATION_LIMIT, DEFAULT_STACK_CAPACITY,
};
pub use errors::{RuntimeError, RuntimeResult};
pub use format::{format_general, render_value};
pub use list::INITIAL_CAPACITY;
pub use operators::{evaluate_binary, BinaryOp};
pub use ops::{lookup_word, Op, Word};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use session::Session;
pub use stack::EvalStack;
pub use string::{codepoint_at, codepoint_len};
pub use unary_operators::{evaluate_unary, UnaryOp};
pub use value::{ListId, Str, StrId, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=kapila_rt=debug` or `RUST_LOG=kapila_rt=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed by the host application wins.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
