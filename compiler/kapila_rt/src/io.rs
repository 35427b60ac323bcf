//! Printing and whole-file I/O.
//!
//! File operations never fail the session: a read that cannot complete
//! produces the empty string and a write that cannot complete produces
//! `false`, with the cause logged at `warn` level.

use std::fs;

use tracing::warn;

use crate::errors::{binary_type_mismatch, type_mismatch, RuntimeResult};
use crate::format::{render_sequence, render_value};
use crate::session::Session;
use crate::value::{Str, Value};

impl Session {
    /// `( v -- )`
    pub fn print(&mut self) -> RuntimeResult<()> {
        self.guarded("print", |s| {
            let [value] = s.stack.top()?;
            let text = render_value(value, &s.arena, &s.config.bool_literals)?;
            s.output.print(&text);
            s.stack.replace_top(1, &[])
        })
    }

    /// `( v -- )` print followed by a newline.
    pub fn println(&mut self) -> RuntimeResult<()> {
        self.guarded("println", |s| {
            let [value] = s.stack.top()?;
            let text = render_value(value, &s.arena, &s.config.bool_literals)?;
            s.output.println(&text);
            s.stack.replace_top(1, &[])
        })
    }

    /// `( -- )` print the whole stack, bottom first, without changing it.
    pub fn show_stack(&mut self) -> RuntimeResult<()> {
        self.guarded(".s", |s| {
            let text = render_sequence(s.stack.values(), &s.arena, &s.config.bool_literals)?;
            s.output.println(&format!("Stack: {text}"));
            Ok(())
        })
    }

    /// `( path -- content )`
    pub fn read_file(&mut self) -> RuntimeResult<()> {
        self.guarded("read-file", |s| {
            let [path] = s.stack.top()?;
            let Value::Str(path) = path else {
                return Err(type_mismatch("read-file", "a string path", path.type_name()));
            };
            let path = s.arena.resolve(path)?;
            let content = match fs::read(path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) => {
                    warn!(path, %err, "read-file failed");
                    String::new()
                }
            };
            let result = if content.is_empty() {
                Value::literal("")
            } else {
                Value::Str(Str::Arena(s.arena.alloc_str(content)?))
            };
            s.stack.replace_top(1, &[result])
        })
    }

    /// `( path content -- ok )` overwrite the file at `path`.
    pub fn write_file(&mut self) -> RuntimeResult<()> {
        self.guarded("write-file", |s| {
            let [path, content] = s.stack.top()?;
            let (Value::Str(path), Value::Str(content)) = (path, content) else {
                return Err(binary_type_mismatch(
                    "write-file",
                    "a string path and string content",
                    path.type_name(),
                    content.type_name(),
                ));
            };
            let path = s.arena.resolve(path)?;
            let ok = match fs::write(path, s.arena.resolve(content)?) {
                Ok(()) => true,
                Err(err) => {
                    warn!(path, %err, "write-file failed");
                    false
                }
            };
            s.stack.replace_top(2, &[Value::Bool(ok)])
        })
    }
}
