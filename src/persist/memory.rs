//! Map-backed storage used by tests and the `memory` backend.

use hashbrown::HashMap;

use super::{KvStorage, StorageError, StorageResult};

/// In-memory [`KvStorage`].
///
/// With a quota set, a `set` that would push the total size of keys and values
/// past the limit fails with [`StorageError::QuotaExceeded`] and keeps the old
/// value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
    fail_reads: bool,
}

impl MemoryStorage {
    /// Empty storage without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty storage limited to `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota_bytes: Some(limit),
            ..Self::default()
        }
    }

    /// Storage pre-seeded with one raw value.
    pub fn seeded(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self {
            items,
            ..Self::default()
        }
    }

    /// Makes every subsequent `get` fail, as a blocked storage would.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Raw stored value, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KvStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
