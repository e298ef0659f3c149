//! Cinderbin paste server.
//!
//! HTTP server for end-to-end-encrypted pastes. Clients encrypt before
//! upload and keep the key in the URL fragment; this process stores and
//! serves ciphertext blobs it has no means to open.
//!
//! # Architecture
//!
//! This crate provides the I/O shell around [`cinderbin_core`]'s pure
//! lifecycle logic: Axum handlers parse HTTP, [`PasteService`] validates and
//! orchestrates, and a [`PasteStore`](cinderbin_core::PasteStore) backend
//! persists. Time enters exactly once per request through the [`Clock`]
//! seam, and every lifecycle effect (burn, expiry purge) executes inside a
//! single atomic store operation.
//!
//! # Components
//!
//! - [`PasteService`]: validation, ID assignment, lifecycle orchestration
//! - [`build_router`]: the HTTP surface (create, read, delete, health)
//! - [`MemoryStore`] / [`RedbStore`]: ephemeral and durable backends
//! - [`Sweeper`]: background removal of expired pastes
//! - [`SystemClock`]: production time source

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod routes;
mod service;
pub mod storage;
mod sweeper;

pub use clock::{Clock, SystemClock};
pub use config::ServerConfig;
pub use routes::build_router;
pub use service::PasteService;
pub use storage::{MemoryStore, RedbStore};
pub use sweeper::Sweeper;
