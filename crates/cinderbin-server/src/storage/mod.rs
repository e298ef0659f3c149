//! Storage backends for the paste store
//!
//! Two implementations of [`PasteStore`](cinderbin_core::PasteStore): an
//! in-memory map for tests and ephemeral deployments, and a redb-backed
//! store for durable ones. Both execute a read's lifecycle decision inside
//! one critical section; that is where burn-exactly-once comes from.

mod memory;
mod redb;

pub use memory::MemoryStore;

pub use self::redb::RedbStore;
