//! SharedIndex - an [`OrderedIndex`] that can be shared across threads.

use parking_lot::RwLock;

use crate::index::{OrderedIndex, StatsSnapshot};
use crate::record::Keyed;

/// An index behind a reader-writer lock.
///
/// [`OrderedIndex`] does no locking of its own. This wrapper serializes
/// every mutation behind the write lock and runs lookups and traversals
/// under the read lock, so a traversal never sees a half-updated tree.
///
/// # Thread Safety
/// - `insert` / `remove`: exclusive write lock, one writer at a time
/// - `find` / `snapshot` / `read`: shared read lock, many at once
///
/// # Example
/// ```
/// use bidtree::{Bid, BidId, SharedIndex};
/// use std::sync::Arc;
///
/// let index = Arc::new(SharedIndex::new());
/// index.insert(Bid::new("1", "Clock", "General", 3.0));
///
/// let found = index.find(&BidId::from("1"));
/// assert_eq!(found.map(|b| b.title), Some("Clock".to_string()));
/// ```
pub struct SharedIndex<R> {
    inner: RwLock<OrderedIndex<R>>,
}

impl<R> SharedIndex<R> {
    /// Create an empty shared index.
    pub fn new() -> Self {
        Self::from_index(OrderedIndex::new())
    }

    /// Wrap an existing index.
    pub fn from_index(index: OrderedIndex<R>) -> Self {
        Self {
            inner: RwLock::new(index),
        }
    }

    /// Unwrap the index.
    pub fn into_inner(self) -> OrderedIndex<R> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` with shared access to the index.
    pub fn read<T>(&self, f: impl FnOnce(&OrderedIndex<R>) -> T) -> T {
        f(&*self.inner.read())
    }

    /// Run `f` with exclusive access to the index.
    pub fn write<T>(&self, f: impl FnOnce(&mut OrderedIndex<R>) -> T) -> T {
        f(&mut *self.inner.write())
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.read().stats().snapshot()
    }
}

impl<R: Keyed> SharedIndex<R> {
    pub fn insert(&self, record: R) {
        self.inner.write().insert(record);
    }

    pub fn remove(&self, key: &R::Key) -> Option<R> {
        self.inner.write().remove(key)
    }
}

impl<R: Keyed + Clone> SharedIndex<R> {
    /// Look up `key` and return a copy of its record.
    pub fn find(&self, key: &R::Key) -> Option<R> {
        self.inner.read().find(key).cloned()
    }

    /// Copy out every record in key order under a single read lock.
    pub fn snapshot(&self) -> Vec<R> {
        self.inner.read().iter().cloned().collect()
    }
}

impl<R> Default for SharedIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}
