//! Share links.
//!
//! A share link is `{base}/paste/{id}#{key}`. Everything before the first
//! `#` can appear in server logs and browser history; the fragment never
//! leaves the client, so the key lives there and nowhere else.

use cinderbin_crypto::SymmetricKey;
use cinderbin_proto::PasteId;

use crate::error::ClientError;

/// The two halves of a shareable paste URL.
#[derive(Clone)]
pub struct ShareLink {
    /// Paste identifier, safe to transmit
    pub id: PasteId,

    /// Paste key, fragment-only
    pub key: SymmetricKey,
}

impl ShareLink {
    /// Pair an identifier with its key.
    pub fn new(id: PasteId, key: SymmetricKey) -> Self {
        Self { id, key }
    }

    /// Render the full URL under `base`, e.g. `https://cinderb.in`.
    pub fn to_url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        format!("{base}/paste/{id}#{key}", id = self.id, key = self.key.export())
    }

    /// Parse a URL produced by [`Self::to_url`].
    ///
    /// Lenient about the address part: the identifier is taken from the last
    /// path segment, so `https://host/paste/{id}`, `/paste/{id}` and a bare
    /// `{id}` all work. The split is on the FIRST `#`, matching what a
    /// browser sends to the server versus what it keeps.
    ///
    /// # Errors
    ///
    /// - `MalformedLink`: no `#` fragment, an empty fragment, a last path
    ///   segment that is not a paste identifier, or a fragment that does not
    ///   decode to a key
    pub fn parse(url: &str) -> Result<Self, ClientError> {
        let Some((address, fragment)) = url.split_once('#') else {
            return Err(malformed("missing #key fragment"));
        };
        if fragment.is_empty() {
            return Err(malformed("missing #key fragment"));
        }

        let segment = address.rsplit('/').next().unwrap_or("");
        let id = segment.parse().map_err(|e| malformed(format!("bad paste id: {e}")))?;

        let key = SymmetricKey::import(fragment)
            .map_err(|e| malformed(format!("bad key fragment: {e}")))?;

        Ok(Self { id, key })
    }
}

fn malformed(reason: impl Into<String>) -> ClientError {
    ClientError::MalformedLink { reason: reason.into() }
}
