//! Native stack headroom for recursive runtime work.
//!
//! The Kapila runtime walks list values recursively when it renders them
//! for `print`. Generated programs can nest lists arbitrarily deep, so the
//! renderer wraps each level in [`ensure_sufficient_stack`], which grows the
//! native stack on demand instead of letting the process abort.
//!
//! - **Native targets**: backed by `stacker::maybe_grow`.
//! - **WASM targets**: plain call; the engine owns the stack there.

/// Headroom below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f` with at least [`RED_ZONE`] bytes of native stack available.
///
/// ```text
/// fn render(&self, id: ListId, out: &mut String) -> RuntimeResult<()> {
///     ensure_sufficient_stack(|| {
///         for item in self.items(id)? {
///             self.render_value(item, out)?;
///         }
///         Ok(())
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
