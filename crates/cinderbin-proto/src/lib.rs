//! Cinderbin Wire Contract
//!
//! Shared types for the HTTP API: paste identifiers, expiry tokens and the
//! JSON request/response bodies. The serialized field names are part of the
//! public API and must not drift; server and clients both serialize through
//! these types.
//!
//! Everything the server sees goes through here, which is also everything it
//! knows: ciphertexts and nonces are opaque base64 strings, and no type in
//! this crate can carry a key.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod expiry;
pub mod id;
pub mod wire;

pub use expiry::{Expiry, UnknownExpiry};
pub use id::{InvalidPasteId, PasteId};
pub use wire::{
    AttachmentPayload, CreatePasteRequest, CreatePasteResponse, ErrorResponse, HealthResponse,
    MAX_ATTACHMENT_BYTES, PasteResponse,
};
