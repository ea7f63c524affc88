//! Storage backend trait abstraction
//!
//! Async domain traits implemented by the `SQLite` backend and the in-memory
//! backend. Handlers and services only ever see `dyn StorageBackend`.

pub mod gauge;
pub mod value;

pub use gauge::GaugeStore;
pub use value::ValueStore;

/// Everything the service layer needs from storage.
pub trait StorageBackend: GaugeStore + ValueStore {}

impl<T: GaugeStore + ValueStore> StorageBackend for T {}
