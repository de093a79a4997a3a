//! Host digest tests
//!
//! The host path is the reference the kernel is judged against, so it is
//! checked here against known vectors and against the independent `sha2`
//! implementation.

use gpu_sha256::host::{checksummed_payload, host_digest, sha256};
use gpu_sha256::{Digest, DigestMode};
use sha2::{Digest as _, Sha256};

fn reference(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[test]
fn test_sha256_empty() {
    assert_eq!(
        sha256(b"").to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha256_two_block_vector() {
    // FIPS 180-2 appendix B.2
    let input = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
    assert_eq!(
        sha256(input).to_hex(),
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    );
}

#[test]
fn test_sha256_single_byte() {
    let digest = sha256(&[0x41]);
    assert_eq!(digest.as_bytes(), &reference(&[0x41]));
    assert_eq!(digest.to_hex().len(), 64);
}

#[test]
fn test_matches_reference_across_padding_boundaries() {
    // 55/56/63/64/65 are the lengths where padding spills into a second block
    for len in 0..=130usize {
        let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
        assert_eq!(
            sha256(&data).as_bytes(),
            &reference(&data),
            "host digest differs from sha2 at length {}",
            len
        );
    }
}

#[test]
fn test_matches_reference_for_large_key() {
    let data = vec![0xa5u8; 1 << 20];
    assert_eq!(sha256(&data).as_bytes(), &reference(&data));
}

#[test]
fn test_double_mode_matches_reference() {
    let key = hex::decode("417e5d84f2dc1a1167fa188d25ba76ca1b73026656").unwrap();
    let expected = reference(&reference(&key));
    assert_eq!(host_digest(&key, DigestMode::Double), Digest::new(expected));
}

#[test]
fn test_host_digest_is_deterministic() {
    let key = b"the same key twice";
    assert_eq!(
        host_digest(key, DigestMode::Single),
        host_digest(key, DigestMode::Single)
    );
}

#[test]
fn test_checksummed_payload_matches_reference() {
    let key = hex::decode("7e5d84f2dc1a1167fa188d25ba76ca1b73026656").unwrap();
    let out = checksummed_payload(0x41, &key);

    let mut prefixed = vec![0x41];
    prefixed.extend_from_slice(&key);
    let check = reference(&reference(&prefixed));

    assert_eq!(out.len(), 25);
    assert_eq!(&out[..21], &prefixed[..]);
    assert_eq!(&out[21..], &check[..4]);
}
