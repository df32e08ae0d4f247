//! In-memory storage implementation.

use super::{BoxFuture, KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {e}"))
}

impl KeyValueStore for MemoryStorage {
    fn set(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let value = value.to_string();
        Box::pin(async move {
            let mut values = self.values.write().map_err(lock_error)?;
            values.insert(key, value);
            Ok(())
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<String>>> {
        let key = key.to_string();
        Box::pin(async move {
            let values = self.values.read().map_err(lock_error)?;
            Ok(values.get(&key).cloned())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut values = self.values.write().map_err(lock_error)?;
            values.remove(&key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_set_and_get() {
        let storage = MemoryStorage::new();
        block_on(storage.set("board", "{}")).unwrap();
        assert_eq!(block_on(storage.get("board")).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert!(block_on(storage.get("nonexistent")).unwrap().is_none());
    }

    #[test]
    fn test_set_replaces() {
        let storage = MemoryStorage::new();
        block_on(storage.set("k", "a")).unwrap();
        block_on(storage.set("k", "b")).unwrap();
        assert_eq!(block_on(storage.get("k")).unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_remove() {
        let storage = MemoryStorage::new();
        block_on(storage.set("k", "a")).unwrap();
        block_on(storage.remove("k")).unwrap();
        block_on(storage.remove("k")).unwrap();
        assert!(block_on(storage.get("k")).unwrap().is_none());
    }
}
