//! Unit-of-work sessions
//!
//! Every store operation runs inside a session acquired from the pool.
//! The guard releases its slot on drop, error paths included, so a session
//! never outlives its unit of work and is never shared across concurrent
//! operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::trace;

/// Hands out scoped store sessions and tracks how many are live
#[derive(Debug, Default)]
pub struct SessionPool {
    active: Arc<AtomicUsize>,
    next_id: AtomicU64,
}

impl SessionPool {
    /// Pool with no live sessions
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a session for one unit of work
    pub fn acquire(&self) -> StoreSession {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.active.fetch_add(1, Ordering::Relaxed);
        trace!(session = id, "session acquired");
        StoreSession {
            id,
            active: Arc::clone(&self.active),
        }
    }

    /// Number of sessions currently live
    pub fn active_sessions(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

/// Scoped session guard; dropping it releases the slot unconditionally
#[derive(Debug)]
pub struct StoreSession {
    id: u64,
    active: Arc<AtomicUsize>,
}

impl StoreSession {
    /// Session identifier for diagnostics
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::Relaxed);
        trace!(session = self.id, "session released");
    }
}
