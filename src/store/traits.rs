//! Trait abstractions for the host's key-value tables.
//!
//! The resolver never owns storage. The host hands it read-only tables and
//! serializes writes itself, so nothing here locks or mutates.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer failures. These are the only errors resolution propagates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The host could not read a table.
    #[error("table {table} unavailable: {reason}")]
    Unavailable { table: String, reason: String },

    /// A stored value could not be decoded.
    #[error("corrupted value in {table} for key {key}: {reason}")]
    Corrupted {
        table: String,
        key: String,
        reason: String,
    },
}

impl StoreError {
    pub fn unavailable(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

/// Read-only view over one key-value table.
pub trait KvMap {
    /// Table name, used in error reports.
    fn name(&self) -> &str;

    /// Fetch the raw value stored under `key`.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Whether `key` is present.
    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Visit every entry. Order is unspecified.
    fn for_each(&self, visitor: &mut dyn FnMut(&[u8], &[u8])) -> StoreResult<()>;
}

impl<T: KvMap + ?Sized> KvMap for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        (**self).has(key)
    }

    fn for_each(&self, visitor: &mut dyn FnMut(&[u8], &[u8])) -> StoreResult<()> {
        (**self).for_each(visitor)
    }
}
