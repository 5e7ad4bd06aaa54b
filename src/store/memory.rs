//! In-memory key-value table.
//!
//! This is the materialized snapshot a host hands to the resolver.

use super::traits::{KvMap, StoreResult};
use std::collections::BTreeMap;

/// A named table held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryKv {
    name: String,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKv {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Insert or replace a value (for host setup).
    pub fn put(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a value, returning it if it existed.
    pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvMap for InMemoryKv {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&[u8], &[u8])) -> StoreResult<()> {
        for (key, value) in &self.entries {
            visitor(key, value);
        }
        Ok(())
    }
}
