use crate::backend::{device_key_len, CudaBackend, DigestBackend};
use crate::config::VerifierConfig;
use crate::digest::{Digest, DigestMode};
use crate::error::{Result, VerifyError};
use crate::host;

/// Host and device digests for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub mode: DigestMode,

    /// Digest computed on the CPU
    pub host_digest: Digest,

    /// Digest written by work-item 0
    pub device_digest: Digest,

    /// Digest written by every work-item, in order
    pub replicas: Vec<Digest>,
}

impl Verification {
    /// Whether the device agrees with the host.
    ///
    /// Every work-item must have produced the host digest.
    pub fn is_match(&self) -> bool {
        self.replicas.iter().all(|d| *d == self.host_digest)
    }

    /// Whether all work-items produced the same digest, regardless of the host
    pub fn replicas_consistent(&self) -> bool {
        self.replicas.iter().all(|d| *d == self.device_digest)
    }

    pub fn into_pair(self) -> (Digest, Digest) {
        (self.host_digest, self.device_digest)
    }
}

/// Computes a key's digest on the host and on a device
pub struct HashVerifier<B = CudaBackend> {
    config: VerifierConfig,
    backend: B,
}

impl HashVerifier<CudaBackend> {
    /// Verifier on the CUDA device named by `config.device_ordinal`
    pub fn new(config: VerifierConfig) -> Result<Self> {
        config.launch.validate()?;
        let backend = CudaBackend::new(config.device_ordinal);
        Ok(Self { config, backend })
    }
}

impl<B: DigestBackend> HashVerifier<B> {
    pub fn with_backend(config: VerifierConfig, backend: B) -> Result<Self> {
        config.launch.validate()?;
        Ok(Self { config, backend })
    }

    /// Hash `key` on the host and on the device.
    ///
    /// A mismatch is not an error; check [`Verification::is_match`].
    pub fn verify(&self, key: &[u8]) -> Result<Verification> {
        device_key_len(key.len())?;

        let mode = self.config.mode;
        let host_digest = host::host_digest(key, mode);

        log::info!(
            "Verifying {} byte key with {} on {} backend",
            key.len(),
            mode,
            self.backend.name()
        );

        let replicas = self.backend.digest(key, mode, self.config.launch)?;
        if replicas.len() != self.config.launch.work_items as usize {
            return Err(VerifyError::BufferTransferError(format!(
                "expected {} digests from device, got {}",
                self.config.launch.work_items,
                replicas.len()
            )));
        }
        let device_digest = replicas[0];

        let verification = Verification {
            mode,
            host_digest,
            device_digest,
            replicas,
        };

        if verification.is_match() {
            log::info!("Host and device agree: {}", host_digest);
        } else {
            log::warn!(
                "Digest mismatch: host={} device={}",
                verification.host_digest,
                verification.device_digest
            );
        }

        Ok(verification)
    }
}
