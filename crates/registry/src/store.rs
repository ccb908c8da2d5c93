use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

/// Key/value store abstraction for registry records.
pub trait RecordStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn contains(&self, key: &K) -> bool;
    /// Insert or replace. Replacing keeps the record's original position.
    fn upsert(&self, key: K, value: V);
    fn remove(&self, key: &K) -> Option<V>;
    /// All records in insertion order.
    fn list(&self) -> Vec<V>;
}

#[derive(Debug)]
struct Records<K, V> {
    order: Vec<K>,
    by_key: HashMap<K, V>,
}

/// In-memory store that remembers insertion order.
#[derive(Debug)]
pub struct InMemoryRecordStore<K, V> {
    inner: RwLock<Records<K, V>>,
}

impl<K, V> InMemoryRecordStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Records {
                order: Vec::new(),
                by_key: HashMap::new(),
            }),
        }
    }
}

impl<K, V> Default for InMemoryRecordStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Writes never leave `Records` half-updated, so a poisoned lock is recovered.
impl<K, V> RecordStore<K, V> for InMemoryRecordStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let records = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        records.by_key.get(key).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        let records = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        records.by_key.contains_key(key)
    }

    fn upsert(&self, key: K, value: V) {
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if records.by_key.insert(key.clone(), value).is_none() {
            records.order.push(key);
        }
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let removed = records.by_key.remove(key)?;
        records.order.retain(|k| k != key);
        Some(removed)
    }

    fn list(&self) -> Vec<V> {
        let records = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        records
            .order
            .iter()
            .filter_map(|k| records.by_key.get(k).cloned())
            .collect()
    }
}
