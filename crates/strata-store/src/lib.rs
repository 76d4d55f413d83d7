//! Strata Store — typed multi-domain key-value persistence.
//!
//! A facade over an embedded key-value engine that lets callers store and
//! retrieve primitive values and arbitrary structured objects under named
//! keys, partitioned into isolated storage domains, without handling
//! serialization, type coercion, or the engine API directly.
//!
//! # Domains
//!
//! | Domain | Purpose | Namespace |
//! |--------|---------|-----------|
//! | [`Domain::General`] | General-purpose storage | `default_storage` |
//! | [`Domain::User`] | User data | `user_storage` |
//! | [`Domain::Config`] | Application configuration | `config_storage` |
//! | [`Domain::Cache`] | Cached data | `cache_storage` |
//! | [`Domain::Encrypted`] | Encrypted at rest | `encrypted_storage` |
//!
//! Domains are mutually isolated: the same key in two domains names two
//! independent entries. The encrypted domain opens with a key injected via
//! [`StorageConfig::with_encryption_key`].
//!
//! # Values
//!
//! Six primitive kinds (text, 32/64-bit integers, single/double floats,
//! booleans) encode natively; anything else goes through [`Storage::put_object`]
//! and is serialized to JSON. Every entry is persisted with an explicit kind
//! tag, so a read requesting the wrong kind deterministically falls back to
//! the caller's default instead of misreading the payload.
//!
//! # Failure policy
//!
//! Storage errors degrade to defaults: the public [`Storage`] methods never
//! panic and never propagate an error — they return the supplied default,
//! `false`, or an empty set, and record a diagnostic via `tracing`. The
//! `try_*` twins expose the underlying [`StoreError`] for callers that need
//! the cause.
//!
//! # Usage
//!
//! ```rust,no_run
//! use strata_store::{Domain, Storage, StorageConfig};
//!
//! # fn main() -> strata_store::StoreResult<()> {
//! let storage = Storage::open(StorageConfig::new("/var/lib/myapp/storage"))?;
//! storage.put(Domain::Config, "greeting", "hello");
//! let _greeting = storage.get(Domain::Config, "greeting", String::new());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod codec;
mod config;
mod domain;
pub mod engine;
mod error;
mod registry;
mod store;
mod value;

pub use config::{SecretKey, StorageConfig};
pub use domain::Domain;
pub use engine::{EngineHandle, MemoryEngine, RedbEngine, StorageEngine};
pub use error::{StoreError, StoreResult};
pub use store::Storage;
pub use value::{Kind, Primitive, Value};
