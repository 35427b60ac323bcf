//! Evaluation stack.
//!
//! Fixed-capacity LIFO of [`Value`]s through which every operation receives
//! its operands and returns its results. Depth is always within
//! `[0, capacity]`: a push past capacity is [`RuntimeError::StackOverflow`]
//! and reading more operands than are present is
//! [`RuntimeError::StackUnderflow`]. Nothing is ever read or written out of
//! bounds.
//!
//! Multi-value edits go through [`EvalStack::replace_top`], which validates
//! both depth and capacity before touching the stack, so a failed edit
//! leaves the stack exactly as it was.

use crate::errors::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// Values are preallocated up to this many slots; deeper stacks grow on
/// demand up to their capacity.
const PREALLOCATED_SLOTS: usize = 1024;

#[derive(Debug)]
pub struct EvalStack {
    values: Vec<Value>,
    capacity: usize,
}

impl EvalStack {
    pub fn new(capacity: usize) -> Self {
        EvalStack {
            values: Vec::with_capacity(capacity.min(PREALLOCATED_SLOTS)),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Contents from bottom to top.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Fail with `StackUnderflow` unless at least `n` values are present.
    #[inline]
    pub fn require(&self, n: usize) -> RuntimeResult<()> {
        if self.values.len() < n {
            return Err(RuntimeError::StackUnderflow {
                needed: n,
                depth: self.values.len(),
            });
        }
        Ok(())
    }

    /// Fail with `StackOverflow` unless `n` more values fit.
    #[inline]
    pub fn ensure_room(&self, n: usize) -> RuntimeResult<()> {
        if self.capacity - self.values.len() < n {
            return Err(RuntimeError::StackOverflow {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    pub fn push(&mut self, value: Value) -> RuntimeResult<()> {
        if self.values.len() >= self.capacity {
            return Err(RuntimeError::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> RuntimeResult<Value> {
        self.require(1)?;
        self.values.pop().ok_or(RuntimeError::StackUnderflow {
            needed: 1,
            depth: 0,
        })
    }

    /// Copy of the top value.
    pub fn peek(&self) -> RuntimeResult<Value> {
        self.require(1)?;
        self.values.last().copied().ok_or(RuntimeError::StackUnderflow {
            needed: 1,
            depth: 0,
        })
    }

    /// Copies of the top `N` values, deepest first, without removing them.
    pub fn top<const N: usize>(&self) -> RuntimeResult<[Value; N]> {
        self.require(N)?;
        let start = self.values.len() - N;
        <[Value; N]>::try_from(&self.values[start..]).map_err(|_| RuntimeError::StackUnderflow {
            needed: N,
            depth: self.values.len(),
        })
    }

    /// Remove the top `consumed` values and push `produced` in order.
    ///
    /// Either the whole edit happens or, on error, nothing does.
    pub fn replace_top(&mut self, consumed: usize, produced: &[Value]) -> RuntimeResult<()> {
        self.require(consumed)?;
        let base = self.values.len() - consumed;
        if base + produced.len() > self.capacity {
            return Err(RuntimeError::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.values.truncate(base);
        self.values.extend_from_slice(produced);
        Ok(())
    }

    /// `( a -- a a )`
    pub fn dup(&mut self) -> RuntimeResult<()> {
        let a = self.peek()?;
        self.push(a)
    }

    /// `( a -- )`
    pub fn drop_top(&mut self) -> RuntimeResult<()> {
        self.pop().map(|_| ())
    }

    /// `( a b -- b a )`
    pub fn swap(&mut self) -> RuntimeResult<()> {
        let [a, b] = self.top()?;
        self.replace_top(2, &[b, a])
    }

    /// `( a b -- a b a )`
    pub fn over(&mut self) -> RuntimeResult<()> {
        let [a, b] = self.top()?;
        self.replace_top(2, &[a, b, a])
    }

    /// `( a b c -- b c a )`
    pub fn rot(&mut self) -> RuntimeResult<()> {
        let [a, b, c] = self.top()?;
        self.replace_top(3, &[b, c, a])
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
