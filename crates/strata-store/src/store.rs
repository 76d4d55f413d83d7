//! The storage facade.
//!
//! [`Storage`] is the public operation surface: typed puts and gets, delete,
//! contains, clear and key listing, each routed through the domain registry
//! and the entry codec. The public methods never panic and never return an
//! error — storage failures degrade to the caller's default (or `false`, or
//! an empty set) with a diagnostic record on the tracing sink. Every public
//! method has a `try_*` twin that exposes the failure cause instead, for
//! callers and tests that need to assert on it.
//!
//! This is a preferences/cache layer, not a transactional store: a `true`
//! from [`Storage::put`] means the engine accepted the write, nothing
//! stronger.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::codec;
use crate::config::StorageConfig;
use crate::domain::Domain;
use crate::engine::{RedbEngine, StorageEngine};
use crate::error::{StoreError, StoreResult};
use crate::registry::DomainRegistry;
use crate::value::{Kind, Primitive, Value};

/// Typed key-value persistence over isolated storage domains.
///
/// Construct one instance at startup with [`Storage::open`] and share it —
/// all methods take `&self` and domain handles are shared by every thread.
///
/// # Example
///
/// ```rust,no_run
/// use strata_store::{Domain, Storage, StorageConfig};
///
/// # fn main() -> strata_store::StoreResult<()> {
/// let storage = Storage::open(StorageConfig::new("/var/lib/myapp/storage"))?;
///
/// storage.put(Domain::User, "age", 30);
/// assert_eq!(storage.get(Domain::User, "age", 0), 30);
/// // Domains are isolated: the same key elsewhere is untouched.
/// assert_eq!(storage.get(Domain::Config, "age", 0), 0);
/// # Ok(())
/// # }
/// ```
pub struct Storage {
    registry: DomainRegistry,
}

impl Storage {
    /// Open the facade over the persistent engine described by `config`.
    ///
    /// Domain namespaces open lazily on first use; this call only prepares
    /// the storage root.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`] if the storage root cannot be created.
    pub fn open(config: StorageConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(config.root())
            .map_err(|err| StoreError::Engine(err.to_string()))?;
        let engine = Arc::new(RedbEngine::new(config.root()));
        Ok(Self::with_engine(engine, config))
    }

    /// Open the facade over an injected engine.
    ///
    /// Used by tests (with [`MemoryEngine`](crate::MemoryEngine)) and by
    /// embedders supplying their own backend.
    #[must_use]
    pub fn with_engine(engine: Arc<dyn StorageEngine>, config: StorageConfig) -> Self {
        Self {
            registry: DomainRegistry::new(engine, config),
        }
    }

    /// Store a primitive value under `key`.
    ///
    /// Returns whether the engine accepted the write. Failures are logged
    /// and reported as `false`, never raised.
    pub fn put(&self, domain: Domain, key: &str, value: impl Into<Value>) -> bool {
        match self.try_put(domain, key, value.into()) {
            Ok(()) => true,
            Err(err) => {
                warn!(%domain, key, %err, "put failed");
                false
            }
        }
    }

    /// Store an arbitrary structured object under `key`.
    ///
    /// The object is serialized through the generic serializer and persisted
    /// as a structured entry. Returns whether the write was accepted;
    /// serialization failures are logged and reported as `false`.
    pub fn put_object<T: Serialize>(&self, domain: Domain, key: &str, object: &T) -> bool {
        match self.try_put_object(domain, key, object) {
            Ok(()) => true,
            Err(err) => {
                warn!(%domain, key, %err, "put_object failed");
                false
            }
        }
    }

    /// Read a primitive value, falling back to `default`.
    ///
    /// The default also acts as the requested kind: a key written as one
    /// primitive kind must be read back as that kind. A mismatched or
    /// undecodable entry returns `default` — the mismatch is observable via
    /// [`Storage::try_get`], never as a panic or a reinterpreted payload.
    pub fn get<P: Primitive>(&self, domain: Domain, key: &str, default: P) -> P {
        match self.try_get(domain, key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err @ StoreError::KindMismatch { .. }) => {
                debug!(%domain, key, %err, "kind mismatch, returning default");
                default
            }
            Err(err) => {
                warn!(%domain, key, %err, "get failed, returning default");
                default
            }
        }
    }

    /// Read a structured object, falling back to `default`.
    ///
    /// An absent key, an empty payload, or any deserialization failure
    /// yields `default`.
    pub fn get_object<T: DeserializeOwned>(&self, domain: Domain, key: &str, default: T) -> T {
        match self.try_get_object(domain, key) {
            Ok(Some(object)) => object,
            Ok(None) => default,
            Err(err) => {
                warn!(%domain, key, %err, "get_object failed, returning default");
                default
            }
        }
    }

    /// Remove `key` from the domain.
    ///
    /// Deletion is idempotent: removing an absent key is a success. Returns
    /// `false` only when the engine fails, with the cause logged.
    pub fn delete(&self, domain: Domain, key: &str) -> bool {
        match self.try_delete(domain, key) {
            Ok(()) => true,
            Err(err) => {
                warn!(%domain, key, %err, "delete failed");
                false
            }
        }
    }

    /// Whether `key` currently exists in the domain.
    ///
    /// Failures (for example an unopenable domain) are logged and reported
    /// as `false`.
    pub fn contains(&self, domain: Domain, key: &str) -> bool {
        match self.try_contains(domain, key) {
            Ok(present) => present,
            Err(err) => {
                warn!(%domain, key, %err, "contains failed");
                false
            }
        }
    }

    /// Remove every key in the domain.
    ///
    /// Failures are logged and swallowed; use [`Storage::try_clear_all`]
    /// when the caller needs the outcome.
    pub fn clear_all(&self, domain: Domain) {
        if let Err(err) = self.try_clear_all(domain) {
            error!(%domain, %err, "clear_all failed");
        }
    }

    /// All keys currently present in the domain, unordered.
    ///
    /// Failures are logged and reported as the empty set.
    pub fn list_keys(&self, domain: Domain) -> HashSet<String> {
        match self.try_list_keys(domain) {
            Ok(keys) => keys,
            Err(err) => {
                warn!(%domain, %err, "list_keys failed");
                HashSet::new()
            }
        }
    }

    /// [`Storage::put`] with an explicit error surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`] if the domain cannot be opened or the
    /// write fails, or [`StoreError::Config`] for the encrypted domain
    /// without a configured key.
    pub fn try_put(&self, domain: Domain, key: &str, value: Value) -> StoreResult<()> {
        let handle = self.registry.resolve(domain)?;
        handle.put(key, &codec::encode(&value))
    }

    /// [`Storage::put_object`] with an explicit error surface.
    ///
    /// # Errors
    ///
    /// As [`Storage::try_put`], plus [`StoreError::Serialization`] if the
    /// object cannot be serialized.
    pub fn try_put_object<T: Serialize>(
        &self,
        domain: Domain,
        key: &str,
        object: &T,
    ) -> StoreResult<()> {
        let value = Value::structured(object)?;
        self.try_put(domain, key, value)
    }

    /// [`Storage::get`] with an explicit error surface. `Ok(None)` means the
    /// key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KindMismatch`] when the stored entry carries a
    /// different kind, [`StoreError::Codec`] for an undecodable entry, or
    /// [`StoreError::Engine`]/[`StoreError::Config`] for domain failures.
    pub fn try_get<P: Primitive>(&self, domain: Domain, key: &str) -> StoreResult<Option<P>> {
        let handle = self.registry.resolve(domain)?;
        let Some(bytes) = handle.get(key)? else {
            return Ok(None);
        };
        let value = codec::decode(&bytes, P::KIND)?;
        match P::from_value(value) {
            Some(primitive) => Ok(Some(primitive)),
            // decode() already matched the kind; this is unreachable unless
            // the codec and the Primitive impls disagree.
            None => Err(StoreError::Codec(format!(
                "decoded entry does not match requested kind {}",
                P::KIND
            ))),
        }
    }

    /// [`Storage::get_object`] with an explicit error surface. `Ok(None)`
    /// means the key is absent or its payload is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KindMismatch`] when the entry is not
    /// structured, [`StoreError::Serialization`] for malformed payloads, or
    /// [`StoreError::Engine`]/[`StoreError::Config`] for domain failures.
    pub fn try_get_object<T: DeserializeOwned>(
        &self,
        domain: Domain,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let handle = self.registry.resolve(domain)?;
        let Some(bytes) = handle.get(key)? else {
            return Ok(None);
        };
        let Value::Structured(payload) = codec::decode(&bytes, Kind::Structured)? else {
            return Ok(None);
        };
        if payload.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&payload)?))
    }

    /// [`Storage::delete`] with an explicit error surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`] if the removal fails, or
    /// [`StoreError::Config`] for the encrypted domain without a key.
    pub fn try_delete(&self, domain: Domain, key: &str) -> StoreResult<()> {
        self.registry.resolve(domain)?.delete(key)
    }

    /// [`Storage::contains`] with an explicit error surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`] on a failed read, or
    /// [`StoreError::Config`] for the encrypted domain without a key.
    pub fn try_contains(&self, domain: Domain, key: &str) -> StoreResult<bool> {
        self.registry.resolve(domain)?.contains(key)
    }

    /// [`Storage::clear_all`] with an explicit error surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`] if the domain cannot be cleared, or
    /// [`StoreError::Config`] for the encrypted domain without a key.
    pub fn try_clear_all(&self, domain: Domain) -> StoreResult<()> {
        self.registry.resolve(domain)?.clear()
    }

    /// [`Storage::list_keys`] with an explicit error surface.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`] on a failed scan, or
    /// [`StoreError::Config`] for the encrypted domain without a key.
    pub fn try_list_keys(&self, domain: Domain) -> StoreResult<HashSet<String>> {
        Ok(self.registry.resolve(domain)?.keys()?.into_iter().collect())
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
