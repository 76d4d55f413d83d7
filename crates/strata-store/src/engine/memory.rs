//! In-memory engine backend for tests and embedding.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::config::SecretKey;
use crate::engine::{EngineHandle, StorageEngine};
use crate::error::{StoreError, StoreResult};

/// Non-persistent storage engine.
///
/// Namespaces live in process memory and are shared across repeated opens of
/// the same name, mirroring the persistent engine's handle sharing. Values
/// are stored as given; at-rest sealing is the persistent backend's concern,
/// so the `key` argument is accepted and ignored.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    namespaces: Mutex<HashMap<String, Arc<MemoryHandle>>>,
}

impl MemoryEngine {
    /// Fresh engine with no namespaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageEngine for MemoryEngine {
    fn open_namespace(
        &self,
        namespace: &str,
        _key: Option<&SecretKey>,
    ) -> StoreResult<Arc<dyn EngineHandle>> {
        let mut namespaces = self.namespaces.lock().map_err(|_| lock_poisoned())?;
        let handle = namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| Arc::new(MemoryHandle::default()));
        Ok(Arc::clone(handle) as Arc<dyn EngineHandle>)
    }
}

#[derive(Debug, Default)]
struct MemoryHandle {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl EngineHandle for MemoryHandle {
    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(|_| lock_poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let entries = self.entries.read().map_err(|_| lock_poisoned())?;
        Ok(entries.contains_key(key))
    }

    fn clear(&self) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;
        entries.clear();
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let entries = self.entries.read().map_err(|_| lock_poisoned())?;
        Ok(entries.keys().cloned().collect())
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Engine("memory namespace lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_a_namespace_shares_its_entries() {
        let engine = MemoryEngine::new();
        let first = engine.open_namespace("ns", None).unwrap();
        first.put("k", b"v").unwrap();

        let second = engine.open_namespace("ns", None).unwrap();
        assert_eq!(second.get("k").unwrap().unwrap(), b"v");
    }

    #[test]
    fn namespaces_are_isolated() {
        let engine = MemoryEngine::new();
        let a = engine.open_namespace("a", None).unwrap();
        let b = engine.open_namespace("b", None).unwrap();
        a.put("k", b"v").unwrap();
        assert_eq!(b.get("k").unwrap(), None);
        assert!(!b.contains("k").unwrap());
    }

    #[test]
    fn delete_is_idempotent() {
        let engine = MemoryEngine::new();
        let ns = engine.open_namespace("ns", None).unwrap();
        ns.delete("missing").unwrap();
        ns.put("k", b"v").unwrap();
        ns.delete("k").unwrap();
        ns.delete("k").unwrap();
        assert!(!ns.contains("k").unwrap());
    }
}
