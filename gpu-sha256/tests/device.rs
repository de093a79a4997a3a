//! Host vs CUDA digest tests
//!
//! These need a CUDA device. Without one they print a notice and return.

use gpu_sha256::{
    host, CudaBackend, DigestBackend, DigestMode, HashVerifier, LaunchShape, VerifierConfig,
    VerifyError,
};

fn try_get_verifier(config: VerifierConfig) -> Option<HashVerifier> {
    let verifier = HashVerifier::new(config).expect("valid config");
    match verifier.verify(b"probe") {
        Ok(_) => Some(verifier),
        Err(VerifyError::DeviceUnavailable(reason)) => {
            eprintln!("Skipping GPU test - no device: {}", reason);
            None
        }
        Err(e) => panic!("device present but verification failed: {}", e),
    }
}

#[test]
fn test_gpu_matches_host_single_byte() {
    if let Some(verifier) = try_get_verifier(VerifierConfig::default()) {
        let result = verifier.verify(&[0x41]).unwrap();
        assert_eq!(result.device_digest, result.host_digest);
        assert!(result.is_match());
    }
}

#[test]
fn test_gpu_matches_host_empty_key() {
    if let Some(verifier) = try_get_verifier(VerifierConfig::default()) {
        let result = verifier.verify(b"").unwrap();
        assert_eq!(
            result.device_digest.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}

#[test]
fn test_gpu_matches_host_across_block_boundaries() {
    if let Some(verifier) = try_get_verifier(VerifierConfig::default()) {
        for len in [55usize, 56, 63, 64, 65, 119, 120, 1000] {
            let key: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let result = verifier.verify(&key).unwrap();
            assert!(result.is_match(), "mismatch at length {}", len);
        }
    }
}

#[test]
fn test_gpu_double_mode() {
    let config = VerifierConfig::default().mode(DigestMode::Double);
    if let Some(verifier) = try_get_verifier(config) {
        let key = hex::decode("417e5d84f2dc1a1167fa188d25ba76ca1b73026656").unwrap();
        let result = verifier.verify(&key).unwrap();
        assert_eq!(result.device_digest, host::host_digest(&key, DigestMode::Double));
    }
}

#[test]
fn test_gpu_verify_is_idempotent() {
    if let Some(verifier) = try_get_verifier(VerifierConfig::default()) {
        let first = verifier.verify(b"hello").unwrap();
        let second = verifier.verify(b"hello").unwrap();
        assert_eq!(first.host_digest, second.host_digest);
        assert_eq!(first.device_digest, second.device_digest);
    }
}

#[test]
fn test_gpu_many_work_items_agree() {
    let config = VerifierConfig::with_params(0, 300, 128).unwrap();
    if let Some(verifier) = try_get_verifier(config) {
        let result = verifier.verify(b"replicated").unwrap();
        assert_eq!(result.replicas.len(), 300);
        assert!(result.replicas_consistent());
        assert!(result.is_match());
    }
}

#[test]
fn test_backend_rejects_zero_work_items() {
    let backend = CudaBackend::new(0);
    let launch = LaunchShape {
        work_items: 0,
        block_size: 1,
    };
    let err = backend.digest(b"k", DigestMode::Single, launch).unwrap_err();
    assert!(matches!(err, VerifyError::InvalidParameter(_)));
}

#[test]
fn test_missing_device_ordinal_is_unavailable() {
    let config = VerifierConfig {
        device_ordinal: 4096,
        ..VerifierConfig::default()
    };
    let verifier = HashVerifier::new(config).unwrap();
    let err = verifier.verify(b"k").unwrap_err();
    assert!(
        matches!(err, VerifyError::DeviceUnavailable(_)),
        "unexpected error: {}",
        err
    );
}
