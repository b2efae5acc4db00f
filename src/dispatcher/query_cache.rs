use indexmap::IndexMap;
use tracing::trace;

use crate::database::{Conditions, Record, Value};

/// Identifies a select: table name plus its filter pairs, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub table: String,
    pub filter: Option<Vec<(String, Value)>>,
}

impl CacheKey {
    pub fn new(table: &str, filter: Option<&Conditions>) -> Self {
        Self {
            table: table.to_string(),
            filter: filter.map(|c| c.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        }
    }
}

/// Bounded least-recently-used cache of select results.
///
/// Entries are kept oldest first; a hit moves the entry to the back and an
/// insert beyond `capacity` evicts the front. Capacity `0` caches nothing.
/// Any write to a table must be followed by [`QueryCache::invalidate_table`].
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: IndexMap<CacheKey, Vec<Record>>,
    capacity: usize,
    pub hits: usize,
    pub misses: usize,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<Vec<Record>> {
        match self.entries.shift_remove(key) {
            Some(records) => {
                self.hits += 1;
                trace!(table = %key.table, "cache hit");
                self.entries.insert(key.clone(), records.clone());
                Some(records)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put(&mut self, key: CacheKey, records: Vec<Record>) {
        if self.capacity == 0 {
            return;
        }
        self.entries.shift_remove(&key);
        while self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                trace!(table = %evicted.table, "cache eviction");
            }
        }
        self.entries.insert(key, records);
    }

    /// Drops every cached result of `table`.
    pub fn invalidate_table(&mut self, table: &str) {
        self.entries.retain(|key, _| key.table != table);
    }
}
