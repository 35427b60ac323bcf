//! Growable lists backed by arena buffers.
//!
//! A list starts with room for [`INITIAL_CAPACITY`] items. When an append
//! finds the buffer full, a buffer of twice the capacity is allocated from
//! the arena, the items are copied over, and the old buffer is abandoned to
//! the arena. Lists are never shrunk or freed individually.

use tracing::trace;

use crate::arena::{Arena, ListRecord};
use crate::errors::RuntimeResult;
use crate::value::{ListId, Value};

/// Capacity of a freshly created list.
pub const INITIAL_CAPACITY: usize = 8;

impl Arena {
    /// Allocate an empty list.
    pub fn list_new(&mut self) -> RuntimeResult<ListId> {
        let buffer = self.alloc_buffer(INITIAL_CAPACITY)?;
        self.alloc_record(ListRecord {
            buffer,
            cap: INITIAL_CAPACITY,
        })
    }

    /// Append `value`, doubling the backing buffer when it is full.
    pub fn list_push_item(&mut self, id: ListId, value: Value) -> RuntimeResult<()> {
        let ListRecord { buffer, cap } = self.record(id)?.clone();
        let len = self.buffer(buffer)?.len();

        let buffer = if len >= cap {
            let new_cap = cap.saturating_mul(2);
            let fresh = self.copy_to_new_buffer(buffer, new_cap)?;
            let record = self.record_mut(id)?;
            record.buffer = fresh;
            record.cap = new_cap;
            trace!(?id, len, new_cap, "list grown");
            fresh
        } else {
            buffer
        };

        self.buffer_mut(buffer)?.push(value);
        Ok(())
    }

    /// Items of a list, in insertion order.
    pub fn list_items(&self, id: ListId) -> RuntimeResult<&[Value]> {
        let record = self.record(id)?;
        self.buffer(record.buffer)
    }

    pub fn list_len(&self, id: ListId) -> RuntimeResult<usize> {
        self.list_items(id).map(<[Value]>::len)
    }

    /// Current capacity of a list's backing buffer.
    pub fn list_capacity(&self, id: ListId) -> RuntimeResult<usize> {
        self.record(id).map(|record| record.cap)
    }

    /// Item at `index`, or `None` outside `[0, len)`.
    pub fn list_at(&self, id: ListId, index: i64) -> RuntimeResult<Option<Value>> {
        let items = self.list_items(id)?;
        Ok(usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .copied())
    }

    /// First item, or `None` for an empty list.
    pub fn list_first(&self, id: ListId) -> RuntimeResult<Option<Value>> {
        Ok(self.list_items(id)?.first().copied())
    }

    /// New list holding every item but the first. Empty and single-item
    /// lists both produce a new empty list.
    pub fn list_rest(&mut self, id: ListId) -> RuntimeResult<ListId> {
        let tail: Vec<Value> = self.list_items(id)?.iter().skip(1).copied().collect();
        let rest = self.list_new()?;
        for item in tail {
            self.list_push_item(rest, item)?;
        }
        Ok(rest)
    }
}
