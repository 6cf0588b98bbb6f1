//! Structural modification counting.
//!
//! A container embeds one `ModTracker` and bumps it on every insert and
//! remove. Cursors snapshot the count when they are created and compare it
//! before each operation, so a structural change made outside the cursor is
//! reported instead of silently skipping or repeating elements.
//!
//! Each tracker also carries a process-unique id. Cursors remember the id of
//! the container they were created on and refuse to run against any other.
//!
//! Detection is best effort. It guarantees that a diverged cursor eventually
//! fails, not that any particular interleaving is caught, and it is not a
//! synchronization primitive.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ids start at 1; 0 never names a tracker.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A monotonically increasing structural modification counter, tagged with
/// the identity of the container that owns it.
#[derive(Debug)]
pub struct ModTracker {
    id: u64,
    count: u64,
}

impl ModTracker {
    /// Create a counter starting at zero, with a fresh id.
    pub fn new() -> ModTracker {
        return ModTracker {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            count: 0,
        };
    }

    /// Identity of the owning container.
    #[inline]
    pub fn id(&self) -> u64 {
        return self.id;
    }

    /// The current count.
    #[inline]
    pub fn count(&self) -> u64 {
        return self.count;
    }

    /// Record one structural modification.
    #[inline]
    pub fn bump(&mut self) {
        self.count = self.count.wrapping_add(1);
    }
}

impl Default for ModTracker {
    fn default() -> ModTracker {
        return ModTracker::new();
    }
}

/// A clone belongs to a new container, so it gets a new id. The count
/// carries over.
impl Clone for ModTracker {
    fn clone(&self) -> ModTracker {
        return ModTracker {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            count: self.count,
        };
    }
}
