//! CPU reference digests
//!
//! These are the values the device kernel is checked against.

use cryptoxide::hashing::sha2::Sha256;

use crate::digest::{Digest, DigestMode};

/// Length of the checksum appended by [`checksummed_payload`]
pub const CHECKSUM_LEN: usize = 4;

/// SHA-256 of `key` on the host
pub fn sha256(key: &[u8]) -> Digest {
    Digest::new(Sha256::new().update(key).finalize())
}

/// Host digest for the given mode
pub fn host_digest(key: &[u8], mode: DigestMode) -> Digest {
    let first = sha256(key);
    match mode {
        DigestMode::Single => first,
        DigestMode::Double => sha256(first.as_bytes()),
    }
}

/// `version || payload || sha256d(version || payload)[..4]`
///
/// This is the versioned, checksummed form printed next to the digests
/// (version `0x41` for the addresses the tool was written for).
pub fn checksummed_payload(version: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    out.push(version);
    out.extend_from_slice(payload);

    let check = host_digest(&out, DigestMode::Double);
    out.extend_from_slice(check.truncated(CHECKSUM_LEN));
    out
}
