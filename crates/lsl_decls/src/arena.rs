//! Bulk string storage for declaration databases.
//!
//! Every piece of payload text copied out of a declaration file lives in a
//! single `StrArena` owned by its database. Entries hold [`StrSpan`] handles
//! instead of owned strings, so there is no per-entry lifetime bookkeeping:
//! dropping the database releases the whole region in one step.

use thiserror::Error;

/// Handle to a string stored in a [`StrArena`].
///
/// Spans are only meaningful against the arena that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrSpan {
    start: u32,
    len: u32,
}

/// The arena addresses its backing buffer with `u32` offsets; declaration
/// text large enough to overflow that aborts the parse that hit it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("declaration string arena exhausted")]
pub struct ArenaFull;

/// Append-only string region with single-shot release.
#[derive(Debug, Default)]
pub struct StrArena {
    buf: String,
}

impl StrArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `text` into the arena and return a span for it.
    pub fn alloc(&mut self, text: &str) -> Result<StrSpan, ArenaFull> {
        let start = u32::try_from(self.buf.len()).map_err(|_| ArenaFull)?;
        let len = u32::try_from(text.len()).map_err(|_| ArenaFull)?;
        start.checked_add(len).ok_or(ArenaFull)?;
        self.buf.push_str(text);
        Ok(StrSpan { start, len })
    }

    /// Resolve a span previously returned by [`alloc`](Self::alloc).
    pub fn resolve(&self, span: StrSpan) -> &str {
        &self.buf[span.start as usize..(span.start + span.len) as usize]
    }

    /// Total bytes held by the region.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_resolve_round_trip() {
        let mut arena = StrArena::new();
        let a = arena.alloc("hello").unwrap();
        let b = arena.alloc("").unwrap();
        let c = arena.alloc("world").unwrap();

        assert_eq!(arena.resolve(a), "hello");
        assert_eq!(arena.resolve(b), "");
        assert_eq!(arena.resolve(c), "world");
        assert_eq!(arena.len(), 10);
    }

    #[test]
    fn spans_survive_later_allocations() {
        let mut arena = StrArena::new();
        let first = arena.alloc("stable").unwrap();
        for i in 0..100 {
            arena.alloc(&format!("filler-{i}")).unwrap();
        }
        assert_eq!(arena.resolve(first), "stable");
    }
}
