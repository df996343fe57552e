//! Shared table primitive for the in-memory stores.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

/// An ordered map guarded by an async lock, with an id sequence.
#[derive(Debug)]
pub(crate) struct Table<K, V> {
    pub(crate) rows: RwLock<BTreeMap<K, V>>,
    sequence: AtomicI64,
}

impl<K: Ord, V> Table<K, V> {
    /// Next value of the id sequence, starting at 1.
    pub(crate) fn next_id(&self) -> i64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Make sure the sequence never hands out `id` or anything below it.
    pub(crate) fn advance_to(&self, id: i64) {
        self.sequence.fetch_max(id, Ordering::SeqCst);
    }
}

impl<K: Ord, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }
}
