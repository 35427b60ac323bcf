//! String and list operations on a session's stack.
//!
//! Strings are indexed by codepoint. Lists are arena-backed and shared by
//! reference: `list_push` mutates the list in place and leaves the same
//! handle on the stack.
//!
//! Out-of-range list access follows the session's [`IndexPolicy`].
//! Out-of-range string access always yields the empty string.

use crate::config::IndexPolicy;
use crate::errors::{binary_type_mismatch, type_mismatch, RuntimeError, RuntimeResult};
use crate::session::Session;
use crate::string::{codepoint_at, codepoint_len};
use crate::value::{ListId, Str, Value};

/// Lengths are reported as Integers; no arena can hold `i64::MAX` items.
fn length_value(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

fn expect_str(op: &'static str, value: Value) -> RuntimeResult<Str> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch(op, "a string", value.type_name()))
}

fn expect_list(op: &'static str, value: Value) -> RuntimeResult<ListId> {
    value
        .as_list()
        .ok_or_else(|| type_mismatch(op, "a list", value.type_name()))
}

impl Session {
    /// Resolve a missing item according to the index policy.
    fn missing_item(&self, index: i64, len: usize) -> RuntimeResult<Value> {
        match self.config.index_policy {
            IndexPolicy::Strict => Err(RuntimeError::IndexOutOfRange { index, len }),
            IndexPolicy::Sentinel => Ok(Value::Int(0)),
        }
    }

    // Strings

    /// `( s -- n )` codepoint count.
    pub fn str_len(&mut self) -> RuntimeResult<()> {
        self.guarded("str-length", |s| {
            let [value] = s.stack.top()?;
            let text = s.arena.resolve(expect_str("str-length", value)?)?;
            let len = length_value(codepoint_len(text));
            s.stack.replace_top(1, &[len])
        })
    }

    /// `( a b -- ab )`
    pub fn str_concat(&mut self) -> RuntimeResult<()> {
        self.guarded(",", |s| {
            let [left, right] = s.stack.top()?;
            let (Value::Str(a), Value::Str(b)) = (left, right) else {
                return Err(binary_type_mismatch(
                    ",",
                    "two strings",
                    left.type_name(),
                    right.type_name(),
                ));
            };
            let joined = [s.arena.resolve(a)?, s.arena.resolve(b)?].concat();
            let id = s.arena.alloc_str(joined)?;
            s.stack.replace_top(2, &[Value::Str(Str::Arena(id))])
        })
    }

    /// `( s i -- c )` the codepoint at `i`, or `""` when out of range.
    pub fn str_at(&mut self) -> RuntimeResult<()> {
        self.guarded("str-at", |s| {
            let [text, index] = s.stack.top()?;
            let text = expect_str("str-at", text)?;
            let index = index
                .as_int()
                .ok_or_else(|| type_mismatch("str-at", "an integer index", index.type_name()))?;
            let found: Option<Box<str>> = codepoint_at(s.arena.resolve(text)?, index).map(Box::from);
            let result = match found {
                Some(ch) => Value::Str(Str::Arena(s.arena.alloc_str(ch)?)),
                None => Value::literal(""),
            };
            s.stack.replace_top(2, &[result])
        })
    }

    // Lists

    /// `( -- l )`
    pub fn list_new(&mut self) -> RuntimeResult<()> {
        self.guarded("list", |s| {
            s.stack.ensure_room(1)?;
            let id = s.arena.list_new()?;
            s.stack.push(Value::List(id))
        })
    }

    /// `( l v -- l )` append `v` in place.
    pub fn list_push(&mut self) -> RuntimeResult<()> {
        self.guarded("append", |s| {
            let [list, item] = s.stack.top()?;
            let id = expect_list("append", list)?;
            s.arena.list_push_item(id, item)?;
            s.stack.replace_top(2, &[list])
        })
    }

    /// `( l -- n )` item count of a list, or codepoint count of a string.
    pub fn list_len(&mut self) -> RuntimeResult<()> {
        self.guarded("length", |s| {
            let [value] = s.stack.top()?;
            let len = match value {
                Value::List(id) => s.arena.list_len(id)?,
                Value::Str(text) => codepoint_len(s.arena.resolve(text)?),
                _ => return Err(type_mismatch("length", "a list or a string", value.type_name())),
            };
            s.stack.replace_top(1, &[length_value(len)])
        })
    }

    /// `( l i -- v )`
    pub fn list_at(&mut self) -> RuntimeResult<()> {
        self.guarded("nth", |s| {
            let [list, index] = s.stack.top()?;
            let id = expect_list("nth", list)?;
            let index = index
                .as_int()
                .ok_or_else(|| type_mismatch("nth", "an integer index", index.type_name()))?;
            let item = match s.arena.list_at(id, index)? {
                Some(item) => item,
                None => s.missing_item(index, s.arena.list_len(id)?)?,
            };
            s.stack.replace_top(2, &[item])
        })
    }

    /// `( l -- v )`
    pub fn list_first(&mut self) -> RuntimeResult<()> {
        self.guarded("first", |s| {
            let [list] = s.stack.top()?;
            let id = expect_list("first", list)?;
            let item = match s.arena.list_first(id)? {
                Some(item) => item,
                None => s.missing_item(0, 0)?,
            };
            s.stack.replace_top(1, &[item])
        })
    }

    /// `( l -- l' )` a new list without the first item.
    pub fn list_rest(&mut self) -> RuntimeResult<()> {
        self.guarded("rest", |s| {
            let [list] = s.stack.top()?;
            let id = expect_list("rest", list)?;
            let rest = s.arena.list_rest(id)?;
            s.stack.replace_top(1, &[Value::List(rest)])
        })
    }
}

#[cfg(test)]
mod tests;
