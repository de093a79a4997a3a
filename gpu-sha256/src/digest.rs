//! Digest values and hashing modes shared by the host and device paths.

use std::fmt;

use crate::error::{Result, VerifyError};

/// Size of a SHA-256 digest in bytes
pub const DIGEST_LEN: usize = 32;

/// A SHA-256 output, compared by value
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a digest from a device buffer slice.
    ///
    /// The slice must be exactly 32 bytes; anything else means the
    /// transfer came back short.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| {
            VerifyError::BufferTransferError(format!(
                "expected {} digest bytes, got {}",
                DIGEST_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Parse a 64-character hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| VerifyError::InvalidParameter(format!("bad hex digest: {}", e)))?;
        Self::from_slice(&bytes).map_err(|_| {
            VerifyError::InvalidParameter(format!(
                "digest must be {} bytes, got {}",
                DIGEST_LEN,
                bytes.len()
            ))
        })
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Leading `len` bytes of the digest (e.g. 20 for an address-sized view).
    ///
    /// `len` is clamped to the digest size.
    pub fn truncated(&self, len: usize) -> &[u8] {
        &self.0[..len.min(DIGEST_LEN)]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// How many SHA-256 passes are applied to the key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestMode {
    /// `sha256(key)`
    #[default]
    Single,
    /// `sha256(sha256(key))`
    Double,
}

impl DigestMode {
    /// Number of SHA-256 passes, as passed to the kernel
    pub fn passes(self) -> u32 {
        match self {
            DigestMode::Single => 1,
            DigestMode::Double => 2,
        }
    }
}

impl fmt::Display for DigestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestMode::Single => f.write_str("sha256"),
            DigestMode::Double => f.write_str("sha256d"),
        }
    }
}
