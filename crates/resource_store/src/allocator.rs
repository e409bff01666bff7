//! Identity allocation for in-memory collections.

use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out strictly increasing ids for one collection, starting at 1.
///
/// Ids are never reused, even after the record holding them is deleted.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicI64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is 1.
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
        }
    }

    /// Returns the next id.
    pub fn next(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
