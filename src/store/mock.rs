//! Failing tables for exercising store-layer errors.

use super::traits::{KvMap, StoreError, StoreResult};

/// A table whose every read fails, as when the host cannot reach its KV store.
#[derive(Debug, Clone)]
pub struct UnavailableKv {
    name: String,
    reason: String,
}

impl UnavailableKv {
    /// Create a table that fails with `reason`.
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::unavailable(self.name.clone(), self.reason.clone())
    }
}

impl KvMap for UnavailableKv {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, _key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Err(self.error())
    }

    fn for_each(&self, _visitor: &mut dyn FnMut(&[u8], &[u8])) -> StoreResult<()> {
        Err(self.error())
    }
}
