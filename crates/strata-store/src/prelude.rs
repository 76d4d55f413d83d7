//! Prelude module - commonly used types for convenient import.
//!
//! Use `use strata_store::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust,no_run
//! use strata_store::prelude::*;
//!
//! # fn main() -> StoreResult<()> {
//! let storage = Storage::open(StorageConfig::new("/var/lib/myapp/storage"))?;
//! storage.put(Domain::User, "age", 30);
//! # Ok(())
//! # }
//! ```

// Errors
pub use crate::{StoreError, StoreResult};

// Facade and configuration
pub use crate::{SecretKey, Storage, StorageConfig};

// Domains and values
pub use crate::{Domain, Kind, Primitive, Value};

// Engine interface
pub use crate::{EngineHandle, MemoryEngine, RedbEngine, StorageEngine};
