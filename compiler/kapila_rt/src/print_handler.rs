//! Destination for `print`, `println` and `.s` output.
//!
//! Generated programs write to stdout. Tests and embedders capture output
//! in a buffer instead, or discard it.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Where a session's printed text goes.
///
/// Enum dispatch: the set of sinks is closed and printing is on the hot path.
pub enum PrintHandler {
    /// Write to the process's stdout.
    Stdout,
    /// Append to an in-memory buffer.
    Buffer(Mutex<String>),
    /// Discard everything.
    Silent,
}

impl PrintHandler {
    /// Emit `text` without a trailing newline.
    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // Output failures (closed pipe) are not program errors.
                let _ = out.write_all(text.as_bytes()).and_then(|()| out.flush());
            }
            Self::Buffer(buf) => buf.lock().push_str(text),
            Self::Silent => {}
        }
    }

    /// Emit `text` followed by a newline.
    pub fn println(&self, text: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = writeln!(out, "{text}");
            }
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(text);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far; empty for stdout and silent handlers.
    pub fn captured(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Return the captured text and empty the buffer.
    pub fn take(&self) -> String {
        match self {
            Self::Buffer(buf) => std::mem::take(&mut *buf.lock()),
            Self::Stdout | Self::Silent => String::new(),
        }
    }
}

/// Print handler shared between a session and whoever inspects its output.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
