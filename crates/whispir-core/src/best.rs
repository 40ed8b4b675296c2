//! Process-wide best candidate, shared by parallel search workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lowest-cost generator set found so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Best<const K: usize> {
    pub score: u64,
    pub generators: [u64; K],
    /// Discovery depth per required element, in target order.
    pub times: Vec<u32>,
}

/// Best-result record with an optimistic lock-free read path.
///
/// `ceiling()` is a relaxed snapshot workers prune against. Writes go
/// through `offer`, which re-checks strict improvement under the mutex,
/// since several workers can pass the pre-check at once.
pub struct SharedBest<const K: usize> {
    score: AtomicU64,
    record: Mutex<Option<Best<K>>>,
}

impl<const K: usize> SharedBest<K> {
    /// Empty record. The ceiling starts at `u64::MAX`, above any real cost.
    pub fn new() -> Self {
        Self {
            score: AtomicU64::new(u64::MAX),
            record: Mutex::new(None),
        }
    }

    pub fn ceiling(&self) -> u64 {
        self.score.load(Ordering::Acquire)
    }

    /// Install `candidate` if it is strictly better than the current best.
    /// Returns `true` when it was installed.
    pub fn offer(&self, candidate: Best<K>) -> bool {
        self.offer_with(candidate, |_| {})
    }

    /// Like [`offer`](Self::offer), running `on_install` on the new best
    /// while the lock is still held, so callbacks see strictly decreasing
    /// scores.
    pub fn offer_with(&self, candidate: Best<K>, on_install: impl FnOnce(&Best<K>)) -> bool {
        if candidate.score >= self.ceiling() {
            return false;
        }
        let mut record = self.lock();
        let current = record.as_ref().map_or(u64::MAX, |b| b.score);
        if candidate.score >= current {
            return false;
        }
        self.score.store(candidate.score, Ordering::Release);
        on_install(&candidate);
        *record = Some(candidate);
        true
    }

    pub fn snapshot(&self) -> Option<Best<K>> {
        self.lock().clone()
    }

    pub fn into_inner(self) -> Option<Best<K>> {
        self.record
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Best<K>>> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<const K: usize> Default for SharedBest<K> {
    fn default() -> Self {
        Self::new()
    }
}
