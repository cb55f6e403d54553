//! Per-course exclusive sections.
//!
//! Count-based admission checks are only race-free if two concurrent
//! creates for the same course can never both observe a stale count. The
//! section registry hands out one `tokio` mutex per course: the admission
//! pipeline runs its checks and commit while holding the course's guard.
//! Tokio mutexes queue waiters FIFO, so a second caller for the same
//! course waits its turn rather than failing, and callers for different
//! courses do not interact at all.
//!
//! The guard is RAII: dropping it — on success, error, or task
//! cancellation — releases the section.

use crate::{LedgerError, LedgerResult};
use campus_types::CourseId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// An acquired course section. Held for the duration of one admission's
/// check pipeline plus commit, never across external calls.
pub type SectionGuard = OwnedMutexGuard<()>;

#[derive(Debug, Default)]
struct SectionsState {
    sections: HashMap<CourseId, Arc<tokio::sync::Mutex<()>>>,
    closed: bool,
}

/// Registry of per-course exclusive sections.
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone, Default)]
pub struct CourseSections {
    inner: Arc<Mutex<SectionsState>>,
}

impl CourseSections {
    /// Creates an open registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the exclusive section for a course, waiting (FIFO) if
    /// another admission for the same course currently holds it.
    ///
    /// Fails with [`LedgerError::Unavailable`] once the registry has been
    /// closed; that failure is surfaced, never retried internally.
    pub async fn lock(&self, course: CourseId) -> LedgerResult<SectionGuard> {
        let section = {
            let mut state = self.inner.lock().unwrap();
            if state.closed {
                return Err(LedgerError::Unavailable);
            }
            state
                .sections
                .entry(course)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        // The registry lock is released before awaiting the section.
        Ok(section.lock_owned().await)
    }

    /// Marks the registry unavailable. Sections already held remain valid
    /// until their guards drop; new acquisitions fail.
    pub fn close(&self) {
        self.inner.lock().unwrap().closed = true;
    }

    /// Returns true if the registry has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }
}
