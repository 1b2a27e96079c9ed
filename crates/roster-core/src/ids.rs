//! User id allocation.
//!
//! Ids start at 1 and only ever grow. Every user constructor draws from an
//! [`IdAllocator`]; the convenience constructors use the process-wide one
//! returned by [`IdAllocator::global`], while tests and embedders can hand in
//! their own.

use std::sync::atomic::{AtomicU64, Ordering};

use roster_types::UserId;
use tracing::trace;

const FIRST_ID: u64 = 1;

static GLOBAL: IdAllocator = IdAllocator::new();

#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(FIRST_ID),
        }
    }

    /// The allocator shared by every default user constructor.
    pub fn global() -> &'static IdAllocator {
        &GLOBAL
    }

    /// Returns the next id and advances the counter.
    pub fn next_id(&self) -> UserId {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        trace!(id = raw, "allocated user id");
        UserId::new(raw)
    }

    /// Returns the id the next call to [`next_id`](Self::next_id) will hand out.
    pub fn peek(&self) -> UserId {
        UserId::new(self.next.load(Ordering::Relaxed))
    }

    /// Restarts allocation at 1. Ids handed out before the reset may repeat.
    pub fn reset(&self) {
        self.next.store(FIRST_ID, Ordering::Relaxed);
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
