//! Persistent engine backend over `redb`.
//!
//! One single-table database file per namespace, placed under the engine's
//! root directory. `redb` provides the atomic per-key reads and writes and
//! the cross-process file locking; this backend only maps entries to the
//! table and, for a keyed namespace, seals values at rest.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::RngCore;
use rand::rngs::OsRng;
use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::config::SecretKey;
use crate::engine::{EngineHandle, StorageEngine};
use crate::error::{StoreError, StoreResult};

const ENTRIES: TableDefinition<&str, &[u8]> = TableDefinition::new("entries");

/// XChaCha20-Poly1305 nonce length prefixed to every sealed value.
const NONCE_LEN: usize = 24;

/// Persistent storage engine backed by `redb`.
///
/// Each namespace maps to `<root>/<namespace>.redb`.
#[derive(Debug, Clone)]
pub struct RedbEngine {
    root: PathBuf,
}

impl RedbEngine {
    /// Engine rooted at the given directory. The directory is created on
    /// first namespace open.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl StorageEngine for RedbEngine {
    fn open_namespace(
        &self,
        namespace: &str,
        key: Option<&SecretKey>,
    ) -> StoreResult<Arc<dyn EngineHandle>> {
        std::fs::create_dir_all(&self.root).map_err(engine_err)?;
        let path = self.root.join(format!("{namespace}.redb"));
        let db = Database::create(&path).map_err(engine_err)?;

        // Create the table up front so a fresh namespace reads as empty.
        let txn = db.begin_write().map_err(engine_err)?;
        txn.open_table(ENTRIES).map_err(engine_err)?;
        txn.commit().map_err(engine_err)?;

        debug!(namespace, path = %path.display(), sealed = key.is_some(), "opened namespace");
        Ok(Arc::new(RedbHandle {
            db,
            seal: key.map(ValueSeal::new),
        }))
    }
}

struct RedbHandle {
    db: Database,
    seal: Option<ValueSeal>,
}

impl EngineHandle for RedbHandle {
    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let stored = match &self.seal {
            Some(seal) => seal.seal(bytes)?,
            None => bytes.to_vec(),
        };
        let txn = self.db.begin_write().map_err(engine_err)?;
        {
            let mut table = txn.open_table(ENTRIES).map_err(engine_err)?;
            table.insert(key, stored.as_slice()).map_err(engine_err)?;
        }
        txn.commit().map_err(engine_err)
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read().map_err(engine_err)?;
        let table = txn.open_table(ENTRIES).map_err(engine_err)?;
        let Some(guard) = table.get(key).map_err(engine_err)? else {
            return Ok(None);
        };
        let stored = guard.value().to_vec();
        match &self.seal {
            Some(seal) => seal.open(&stored).map(Some),
            None => Ok(Some(stored)),
        }
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(engine_err)?;
        {
            let mut table = txn.open_table(ENTRIES).map_err(engine_err)?;
            table.remove(key).map_err(engine_err)?;
        }
        txn.commit().map_err(engine_err)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        let txn = self.db.begin_read().map_err(engine_err)?;
        let table = txn.open_table(ENTRIES).map_err(engine_err)?;
        Ok(table.get(key).map_err(engine_err)?.is_some())
    }

    fn clear(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(engine_err)?;
        txn.delete_table(ENTRIES).map_err(engine_err)?;
        txn.open_table(ENTRIES).map_err(engine_err)?;
        txn.commit().map_err(engine_err)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let txn = self.db.begin_read().map_err(engine_err)?;
        let table = txn.open_table(ENTRIES).map_err(engine_err)?;
        let mut keys = Vec::new();
        for entry in table.iter().map_err(engine_err)? {
            let (key, _) = entry.map_err(engine_err)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

impl fmt::Debug for RedbHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbHandle")
            .field("sealed", &self.seal.is_some())
            .finish_non_exhaustive()
    }
}

/// At-rest value sealing for keyed namespaces.
///
/// Stored layout: 24-byte random nonce, then the AEAD ciphertext. A value
/// read with the wrong key fails authentication and is reported as a codec
/// failure, which the facade degrades to the caller's default.
struct ValueSeal {
    cipher: XChaCha20Poly1305,
}

impl ValueSeal {
    fn new(key: &SecretKey) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(key.bytes())),
        }
    }

    fn seal(&self, plain: &[u8]) -> StoreResult<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let sealed = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce), plain)
            .map_err(|_| StoreError::Engine("value sealing failed".to_string()))?;
        let mut out = Vec::new();
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn open(&self, stored: &[u8]) -> StoreResult<Vec<u8>> {
        let Some((nonce, sealed)) = stored.split_at_checked(NONCE_LEN) else {
            return Err(StoreError::Codec("sealed entry shorter than its nonce".to_string()));
        };
        self.cipher
            .decrypt(XNonce::from_slice(nonce), sealed)
            .map_err(|_| StoreError::Codec("sealed entry failed authentication".to_string()))
    }
}

fn engine_err(err: impl fmt::Display) -> StoreError {
    StoreError::Engine(err.to_string())
}
