//! Narrow interface to the embedded key-value engine.
//!
//! The facade consumes the engine through two small traits:
//! [`StorageEngine`] opens one handle per namespace, and [`EngineHandle`]
//! exposes the atomic per-key byte operations the engine guarantees. The
//! facade adds no persistence logic of its own — compaction, durability and
//! cross-process safety are entirely the backend's contract.
//!
//! Two backends ship with the crate:
//!
//! - [`RedbEngine`]: persistent storage backed by `redb` (default)
//! - [`MemoryEngine`]: non-persistent storage for tests and embedding

mod memory;
mod redb;

use std::sync::Arc;

use crate::config::SecretKey;
use crate::error::StoreResult;

pub use memory::MemoryEngine;
pub use redb::RedbEngine;

/// Factory for namespace handles.
pub trait StorageEngine: Send + Sync {
    /// Open (or create) the named namespace.
    ///
    /// Called at most once per namespace by the registry; the returned handle
    /// is shared for the rest of the process. `key` is supplied only for the
    /// encrypted domain's namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`](crate::StoreError::Engine) if the
    /// namespace cannot be opened. This is the one failure class the facade
    /// surfaces instead of absorbing.
    fn open_namespace(
        &self,
        namespace: &str,
        key: Option<&SecretKey>,
    ) -> StoreResult<Arc<dyn EngineHandle>>;
}

/// An open connection to one namespace.
///
/// Handles are shared by every thread in the process and are never closed
/// explicitly; their lifetime is the process lifetime. All operations are
/// blocking and atomic per key.
pub trait EngineHandle: Send + Sync {
    /// Write the entry bytes for `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`](crate::StoreError::Engine) if the
    /// write is not accepted.
    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Read the entry bytes for `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`](crate::StoreError::Engine) on a failed
    /// read, or a codec-class error if a sealed value fails authentication.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Remove `key`. Removing an absent key succeeds; deletion is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`](crate::StoreError::Engine) if the
    /// removal fails.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Whether `key` currently has an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`](crate::StoreError::Engine) on a failed
    /// read.
    fn contains(&self, key: &str) -> StoreResult<bool>;

    /// Remove every entry in the namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`](crate::StoreError::Engine) if the
    /// namespace cannot be cleared.
    fn clear(&self) -> StoreResult<()>;

    /// All keys currently present, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`](crate::StoreError::Engine) on a failed
    /// scan.
    fn keys(&self) -> StoreResult<Vec<String>>;
}
