//! Key-value storage slots for Shopfront client state.
//!
//! Provides a small string-keyed store abstraction with interchangeable
//! backends, plus a typed [`Slot`] view that handles JSON encoding.
//!
//! # Example
//!
//! ```rust
//! use shopfront_storage::{MemoryStorage, Slot};
//!
//! let storage = MemoryStorage::new();
//! let slot: Slot<Vec<String>> = Slot::new("recent_searches");
//!
//! slot.write(&storage, &vec!["mugs".to_string()]).unwrap();
//! let recent = slot.read(&storage).unwrap();
//! assert_eq!(recent, Some(vec!["mugs".to_string()]));
//! ```

mod error;
mod file;
mod kv;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::StorageError;
pub use file::FileStorage;
pub use kv::{Slot, Storage};
pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStorage, MemoryStorage, Slot, Storage, StorageError};
}
