//! Client-side paste workflow.
//!
//! Everything a frontend needs between "user typed a note" and "user has a
//! link to share": encrypt under a fresh key, build the create request,
//! render and parse share links, decrypt a served paste. The server never
//! appears in this crate; callers bring their own HTTP transport.
//!
//! # Components
//!
//! - [`seal`] / [`open`]: encrypt a paste for upload, decrypt a served one
//! - [`ShareLink`]: the `{address}#{key}` URL split that keeps the key
//!   out of every request
//! - [`ClientError`]: what can go wrong on this side of the wire

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod paste;
mod share;

pub use error::ClientError;
pub use paste::{FileToAttach, OpenedPaste, PasteOptions, SealedPaste, open, seal};
pub use share::ShareLink;
