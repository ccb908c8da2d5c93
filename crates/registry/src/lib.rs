//! In-memory system of record for licensees, schools and payments.
//!
//! The registry is the only place schools are persisted, and every school it
//! stores has just been through the projection engine.

pub mod record;
pub mod registry;
pub mod snapshot;
pub mod store;

pub use record::Versioned;
pub use registry::Registry;
pub use snapshot::{Snapshot, SnapshotError};
pub use store::{InMemoryRecordStore, RecordStore};
