//! Session-scoped region allocator.
//!
//! The arena owns every dynamically sized payload a session creates: string
//! buffers, list records and list backing buffers. Nothing is released
//! individually. [`Arena::release_all`] drops everything at once when the
//! session is cleaned up, so values never need ownership bookkeeping and
//! use-after-free is impossible: a handle from a released generation is
//! reported as [`RuntimeError::StaleHandle`]. Generations are drawn from a
//! process-wide counter, so a handle issued by one arena is also stale in
//! every other arena.
//!
//! # Layout
//!
//! Payloads live in flat vectors indexed by [`StrId`] / [`ListId`]. A list
//! record points at its current backing buffer; when the list outgrows it a
//! larger buffer is allocated and the old one is abandoned in place.
//!
//! # Limits
//!
//! Every allocation (string, list record, or buffer, including abandoned
//! ones) counts against the configured limit. Reaching it fails with
//! [`RuntimeError::AllocationLimitExceeded`] rather than dropping track of
//! the allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::errors::{RuntimeError, RuntimeResult};
use crate::value::{ListId, Str, StrId, Value};

/// Source of arena generations. Every arena and every release draws a
/// fresh value, so no two live regions in the process share one.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Bookkeeping for one list: which buffer holds its items and how many
/// items that buffer may hold before the list must grow.
#[derive(Clone, Debug)]
pub(crate) struct ListRecord {
    pub(crate) buffer: usize,
    pub(crate) cap: usize,
}

/// Region allocator for one session.
#[derive(Debug)]
pub struct Arena {
    strings: Vec<Box<str>>,
    lists: Vec<ListRecord>,
    buffers: Vec<Vec<Value>>,
    generation: u64,
    limit: usize,
}

impl Arena {
    /// Create an empty arena that accepts at most `limit` allocations.
    pub fn new(limit: usize) -> Self {
        Arena {
            strings: Vec::new(),
            lists: Vec::new(),
            buffers: Vec::new(),
            generation: next_generation(),
            limit,
        }
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of allocations made since the last release.
    #[inline]
    pub fn allocation_count(&self) -> usize {
        self.strings.len() + self.lists.len() + self.buffers.len()
    }

    /// Generation stamped on handles issued from now on.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Change the allocation limit. Existing allocations are kept even if
    /// they already exceed the new limit.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Check that one more allocation fits and return the slot index it
    /// will occupy in a table currently holding `table_len` entries.
    fn reserve(&self, table_len: usize) -> RuntimeResult<u32> {
        let exhausted = RuntimeError::AllocationLimitExceeded { limit: self.limit };
        if self.allocation_count() >= self.limit {
            return Err(exhausted);
        }
        u32::try_from(table_len).map_err(|_| exhausted)
    }

    /// Copy `s` into a new arena-owned buffer.
    pub fn alloc_str(&mut self, s: impl Into<Box<str>>) -> RuntimeResult<StrId> {
        let index = self.reserve(self.strings.len())?;
        self.strings.push(s.into());
        Ok(StrId::new(index, self.generation))
    }

    /// Borrow the contents of an arena string.
    pub fn get_str(&self, id: StrId) -> RuntimeResult<&str> {
        if id.generation() != self.generation {
            return Err(RuntimeError::StaleHandle);
        }
        self.strings
            .get(id.index())
            .map(|s| &**s)
            .ok_or(RuntimeError::StaleHandle)
    }

    /// Borrow the contents of any string value, literal or arena-owned.
    pub fn resolve(&self, s: Str) -> RuntimeResult<&str> {
        match s {
            Str::Literal(text) => Ok(text),
            Str::Arena(id) => self.get_str(id),
        }
    }

    /// Allocate an empty backing buffer able to hold `cap` values.
    pub(crate) fn alloc_buffer(&mut self, cap: usize) -> RuntimeResult<usize> {
        let index = self.reserve(self.buffers.len())? as usize;
        self.buffers.push(Vec::with_capacity(cap));
        Ok(index)
    }

    /// Allocate a list record.
    pub(crate) fn alloc_record(&mut self, record: ListRecord) -> RuntimeResult<ListId> {
        let index = self.reserve(self.lists.len())?;
        self.lists.push(record);
        Ok(ListId::new(index, self.generation))
    }

    pub(crate) fn record(&self, id: ListId) -> RuntimeResult<&ListRecord> {
        if id.generation() != self.generation {
            return Err(RuntimeError::StaleHandle);
        }
        self.lists.get(id.index()).ok_or(RuntimeError::StaleHandle)
    }

    pub(crate) fn record_mut(&mut self, id: ListId) -> RuntimeResult<&mut ListRecord> {
        if id.generation() != self.generation {
            return Err(RuntimeError::StaleHandle);
        }
        self.lists.get_mut(id.index()).ok_or(RuntimeError::StaleHandle)
    }

    pub(crate) fn buffer(&self, index: usize) -> RuntimeResult<&[Value]> {
        self.buffers
            .get(index)
            .map(Vec::as_slice)
            .ok_or(RuntimeError::StaleHandle)
    }

    pub(crate) fn buffer_mut(&mut self, index: usize) -> RuntimeResult<&mut Vec<Value>> {
        self.buffers.get_mut(index).ok_or(RuntimeError::StaleHandle)
    }

    /// Allocate a buffer of capacity `cap` holding a copy of buffer `old`.
    /// The old buffer stays allocated until the next release.
    pub(crate) fn copy_to_new_buffer(&mut self, old: usize, cap: usize) -> RuntimeResult<usize> {
        let fresh = self.alloc_buffer(cap)?;
        // `fresh` was just pushed, so every existing buffer sits before it.
        let (existing, tail) = self.buffers.split_at_mut(fresh);
        let source = existing.get(old).ok_or(RuntimeError::StaleHandle)?;
        if let Some(target) = tail.first_mut() {
            target.extend_from_slice(source);
        }
        Ok(fresh)
    }

    /// Release every allocation at once and invalidate all handles issued
    /// so far. Safe to call repeatedly.
    pub fn release_all(&mut self) {
        let released = self.allocation_count();
        self.strings = Vec::new();
        self.lists = Vec::new();
        self.buffers = Vec::new();
        self.generation = next_generation();
        debug!(released, generation = self.generation, "arena released");
    }
}
