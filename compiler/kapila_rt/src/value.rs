//! Runtime values.
//!
//! A [`Value`] is a small `Copy` record. Scalars are stored inline; strings
//! and lists are handles into the session's [`Arena`](crate::Arena), which
//! owns the payload until the session is cleaned up. Copying a list value
//! therefore aliases the list, it never duplicates it.
//!
//! Handles carry the arena generation they were issued under. Generations
//! are unique across every arena in the process, so a value kept across
//! `cleanup` or carried into another session is rejected instead of
//! reading memory it does not own.

use std::fmt;

/// Handle to a string buffer owned by the arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct StrId {
    index: u32,
    generation: u64,
}

/// Handle to a list record owned by the arena.
///
/// Two `ListId`s are equal exactly when they name the same list, which is
/// what cycle detection during printing relies on.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListId {
    index: u32,
    generation: u64,
}

macro_rules! arena_handle {
    ($name:ident) => {
        impl $name {
            #[inline]
            pub(crate) const fn new(index: u32, generation: u64) -> Self {
                $name { index, generation }
            }

            #[inline]
            pub(crate) const fn index(self) -> usize {
                self.index as usize
            }

            #[inline]
            pub(crate) const fn generation(self) -> u64 {
                self.generation
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}@{})", stringify!($name), self.index, self.generation)
            }
        }
    };
}

arena_handle!(StrId);
arena_handle!(ListId);

/// String payload of a [`Value`].
///
/// Literals emitted by the code generator are referenced in place; strings
/// produced at run time live in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Str {
    Literal(&'static str),
    Arena(StrId),
}

/// A runtime datum.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Str),
    List(ListId),
}

impl Value {
    /// Wrap a static string without allocating.
    #[inline]
    pub const fn literal(s: &'static str) -> Self {
        Value::Str(Str::Literal(s))
    }

    /// Name of the variant, as used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }

    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric value widened to `f64`, or `None` for non-numbers.
    #[inline]
    #[expect(
        clippy::cast_precision_loss,
        reason = "integer to float widening is the language's promotion rule"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(n) => Some(n as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> Option<Str> {
        match *self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_list(&self) -> Option<ListId> {
        match *self {
            Value::List(id) => Some(id),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ListId> for Value {
    fn from(id: ListId) -> Self {
        Value::List(id)
    }
}
