//! Storage configuration.
//!
//! All initialization input is carried explicitly by [`StorageConfig`] and
//! handed to [`Storage::open`](crate::Storage::open). The encryption key for
//! the encrypted domain is injected here; it is never embedded in the code.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key material for the encrypted domain.
///
/// The bytes are zeroized on drop to avoid leaking key material; `Debug`
/// output is redacted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; Self::LEN]);

impl SecretKey {
    /// Key length in bytes.
    pub const LEN: usize = 32;

    /// Wrap raw key bytes.
    #[must_use]
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes, crate-internal.
    pub(crate) const fn bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl From<[u8; SecretKey::LEN]> for SecretKey {
    fn from(bytes: [u8; SecretKey::LEN]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Configuration for [`Storage::open`](crate::Storage::open).
///
/// # Example
///
/// ```rust,no_run
/// use strata_store::{SecretKey, StorageConfig};
///
/// let config = StorageConfig::new("/var/lib/myapp/storage")
///     .with_encryption_key(SecretKey::new([0u8; 32]));
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
    encryption_key: Option<SecretKey>,
}

impl StorageConfig {
    /// Configuration rooted at the given directory.
    ///
    /// The persistent engine places one namespace database per domain under
    /// this directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            encryption_key: None,
        }
    }

    /// Supply the key used to open the encrypted domain.
    ///
    /// Without a key, operations against
    /// [`Domain::Encrypted`](crate::Domain::Encrypted) fail with a
    /// configuration error.
    #[must_use]
    pub fn with_encryption_key(mut self, key: SecretKey) -> Self {
        self.encryption_key = Some(key);
        self
    }

    /// The storage root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn encryption_key(&self) -> Option<&SecretKey> {
        self.encryption_key.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_key_debug_is_redacted() {
        let key = SecretKey::new([0xAB; 32]);
        assert_eq!(format!("{key:?}"), "SecretKey(..)");
    }

    #[test]
    fn config_carries_key_only_when_supplied() {
        let bare = StorageConfig::new("/tmp/strata");
        assert!(bare.encryption_key().is_none());

        let keyed = StorageConfig::new("/tmp/strata").with_encryption_key(SecretKey::new([1; 32]));
        assert!(keyed.encryption_key().is_some());
        assert_eq!(keyed.root(), Path::new("/tmp/strata"));
    }
}
