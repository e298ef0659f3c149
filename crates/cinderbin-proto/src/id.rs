//! Paste identifiers
//!
//! Eight server-generated random bytes, rendered as 16 lowercase hex
//! characters. Short enough for a shareable URL, random enough that guessing
//! an active ID is not a practical attack.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de, ser};
use thiserror::Error;

/// Paste identifier length in raw bytes
pub const ID_LEN: usize = 8;

/// Paste identifier length in hex characters
pub const ID_HEX_LEN: usize = ID_LEN * 2;

/// A paste identifier.
///
/// Parsing is case-insensitive; display is always lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PasteId([u8; ID_LEN]);

/// The string was not exactly 16 hex characters
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid paste id: expected {ID_HEX_LEN} hex characters")]
pub struct InvalidPasteId;

impl PasteId {
    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl fmt::Display for PasteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for PasteId {
    type Err = InvalidPasteId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ID_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidPasteId);
        }

        let mut bytes = [0u8; ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = s.get(i * 2..i * 2 + 2).ok_or(InvalidPasteId)?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| InvalidPasteId)?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for PasteId {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PasteId {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_hex() {
        let id = PasteId::from_bytes([0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
        assert_eq!(id.to_string(), "0123456789abcdef");
    }

    #[test]
    fn parse_roundtrip() {
        let id = PasteId::from_bytes([0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x11, 0x22, 0x33]);
        let parsed: PasteId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_accepts_uppercase() {
        let parsed: PasteId = "DEADBEEF00112233".parse().unwrap();
        assert_eq!(parsed.to_string(), "deadbeef00112233");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("abc".parse::<PasteId>().is_err());
        assert!("0123456789abcdef0".parse::<PasteId>().is_err());
        assert!("".parse::<PasteId>().is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!("0123456789abcdeg".parse::<PasteId>().is_err());
        assert!("0123456789abcde ".parse::<PasteId>().is_err());
        // A sign would sneak through from_str_radix without the hexdigit check
        assert!("+123456789abcdef".parse::<PasteId>().is_err());
    }

    #[test]
    fn parse_rejects_multibyte_input() {
        assert!("0123456789abcd\u{e9}".parse::<PasteId>().is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let id = PasteId::from_bytes([0xFF; 8]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ffffffffffffffff\"");

        let back: PasteId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn serde_rejects_malformed() {
        assert!(serde_json::from_str::<PasteId>("\"nope\"").is_err());
        assert!(serde_json::from_str::<PasteId>("42").is_err());
    }
}
