use std::fmt;

use serde::Serialize;
use sha2::Sha256;
use sha2::digest::Output;

/// Length of a rendered SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Minimum host buffer for a digest: hex characters plus terminator
pub const DIGEST_BUFFER_CAPACITY: usize = DIGEST_HEX_LEN + 1;

/// Lowercase hex SHA-256 digest. Always exactly 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HashDigest(String);

impl HashDigest {
    /// Render raw SHA-256 output. The fixed 32-byte input keeps the 64-character form.
    pub fn from_digest(bytes: Output<Sha256>) -> Self {
        Self(hex::encode(bytes))
    }

    /// Accept a user-supplied digest (config, watchlists). Uppercase hex is normalized.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() != DIGEST_HEX_LEN || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
