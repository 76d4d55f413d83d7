//! Domain handle registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::StorageConfig;
use crate::domain::Domain;
use crate::engine::{EngineHandle, StorageEngine};
use crate::error::{StoreError, StoreResult};

/// Routes each domain to its memoized engine handle.
///
/// Handles open lazily on first resolve and live as long as the registry.
/// The mutex-guarded check-and-set guarantees exactly-once construction per
/// domain even under concurrent first access. An open failure is returned to
/// the caller — no later operation is meaningful without the handle, so
/// nothing here masks it.
pub(crate) struct DomainRegistry {
    engine: Arc<dyn StorageEngine>,
    config: StorageConfig,
    handles: Mutex<HashMap<Domain, Arc<dyn EngineHandle>>>,
}

impl DomainRegistry {
    pub(crate) fn new(engine: Arc<dyn StorageEngine>, config: StorageConfig) -> Self {
        Self {
            engine,
            config,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Idempotent handle lookup, opening the namespace on first use.
    ///
    /// The encrypted domain's namespace opens with the configured key; a
    /// missing key is a configuration error, not a silent downgrade to an
    /// unsealed namespace.
    pub(crate) fn resolve(&self, domain: Domain) -> StoreResult<Arc<dyn EngineHandle>> {
        let mut handles = self
            .handles
            .lock()
            .map_err(|_| StoreError::Engine("registry lock poisoned".to_string()))?;
        if let Some(handle) = handles.get(&domain) {
            return Ok(Arc::clone(handle));
        }

        let key = if domain.is_encrypted() {
            Some(self.config.encryption_key().ok_or_else(|| {
                StoreError::Config("encrypted domain requires an encryption key".to_string())
            })?)
        } else {
            None
        };
        let handle = self.engine.open_namespace(domain.namespace(), key)?;
        handles.insert(domain, Arc::clone(&handle));
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::engine::MemoryEngine;

    /// Counts namespace opens so tests can assert exactly-once construction.
    #[derive(Default)]
    struct CountingEngine {
        inner: MemoryEngine,
        opens: AtomicUsize,
    }

    impl StorageEngine for CountingEngine {
        fn open_namespace(
            &self,
            namespace: &str,
            key: Option<&crate::SecretKey>,
        ) -> StoreResult<Arc<dyn EngineHandle>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.inner.open_namespace(namespace, key)
        }
    }

    #[test]
    fn resolve_is_memoized() {
        let engine = Arc::new(CountingEngine::default());
        let registry = DomainRegistry::new(
            Arc::clone(&engine) as Arc<dyn StorageEngine>,
            StorageConfig::new("unused"),
        );

        registry.resolve(Domain::User).unwrap();
        registry.resolve(Domain::User).unwrap();
        registry.resolve(Domain::Cache).unwrap();
        assert_eq!(engine.opens.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_first_resolve_opens_once() {
        let engine = Arc::new(CountingEngine::default());
        let registry = Arc::new(DomainRegistry::new(
            Arc::clone(&engine) as Arc<dyn StorageEngine>,
            StorageConfig::new("unused"),
        ));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || registry.resolve(Domain::General).unwrap());
            }
        });
        assert_eq!(engine.opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn encrypted_domain_without_key_is_a_config_error() {
        let registry = DomainRegistry::new(
            Arc::new(MemoryEngine::new()),
            StorageConfig::new("unused"),
        );
        assert!(matches!(
            registry.resolve(Domain::Encrypted),
            Err(StoreError::Config(_))
        ));
        assert!(registry.resolve(Domain::General).is_ok());
    }
}
