//! # GPU SHA-256 verifier
//!
//! Computes the SHA-256 digest of a key twice, once on the host and once
//! with a CUDA kernel, so the kernel can be checked against a trusted
//! CPU implementation.
//!
//! - Kernel is compiled at runtime with NVRTC for the architecture
//!   detected at build time
//! - Context, stream and buffers live only for the duration of one call
//! - Configurable launch shape; every work-item's digest is read back

mod backend;
mod config;
mod digest;
mod error;
pub mod host;
pub mod kernel;
mod verifier;

pub use backend::{device_key_len, CudaBackend, DigestBackend};
pub use config::{LaunchShape, VerifierConfig};
pub use digest::{Digest, DigestMode, DIGEST_LEN};
pub use error::{Result, VerifyError};
pub use verifier::{HashVerifier, Verification};

/// Digest `key` on the host and on CUDA device 0 with one work-item.
///
/// Returns `(host_digest, device_digest)`; equal digests mean the kernel
/// agrees with the host.
///
/// # Example
/// ```no_run
/// let (host, device) = gpu_sha256::verify(b"abc")?;
/// assert_eq!(host, device);
/// # Ok::<(), gpu_sha256::VerifyError>(())
/// ```
pub fn verify(key: &[u8]) -> Result<(Digest, Digest)> {
    let verifier = HashVerifier::new(VerifierConfig::default())?;
    Ok(verifier.verify(key)?.into_pair())
}
