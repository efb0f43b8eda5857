//! Deterministic object identifiers.
//!
//! Imported records are keyed by an identifier derived from a natural key
//! (for example the question text), so re-running an import overwrites
//! existing objects instead of creating duplicates.
//!
//! Derivation: lowercase the key, take the MD5 digest of its UTF-8 bytes and
//! render the 16 bytes as `8-4-4-4-12` lowercase hex groups. Version and
//! variant bits are left as the digest produced them, so the result is
//! UUID-shaped but not an RFC 4122 name-based UUID.

use std::fmt;
use std::str::FromStr;

use md5::{Digest, Md5};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::DemoError;

/// Identifier of an object stored in the vector database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Derive the identifier for a natural key.
    pub fn derive(natural_key: &str) -> Self {
        let normalized = natural_key.to_lowercase();
        let digest = Md5::digest(normalized.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest);
        Self(Uuid::from_bytes(bytes))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Derive the object identifier for `natural_key`.
///
/// Keys that differ only in case map to the same identifier.
pub fn derive_object_id(natural_key: &str) -> ObjectId {
    ObjectId::derive(natural_key)
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated formatting is lowercase
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ObjectId {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DemoError::InvalidInput(format!("invalid object id {s:?}: {e}")))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
