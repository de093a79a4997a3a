/**
 * Check GPU determinism - does the kernel always produce the same digest?
 */

use gpu_sha256::{HashVerifier, VerifierConfig};

fn main() {
    println!("=== GPU Determinism Test ===\n");

    let verifier = HashVerifier::new(VerifierConfig::default())
        .expect("Failed to create verifier");
    let key = b"hello";

    println!("Running GPU hash 5 times...\n");

    let mut digests = Vec::new();
    for i in 1..=5 {
        let result = verifier.verify(key).expect("Failed to compute hash on GPU");
        println!("Run {}: {}", i, result.device_digest);
        digests.push(result.device_digest);
    }

    println!();

    let first = &digests[0];
    let all_same = digests.iter().all(|d| d == first);

    if all_same {
        println!("✓ GPU is DETERMINISTIC (all 5 runs match)");
    } else {
        println!("✗ GPU is NON-DETERMINISTIC (runs differ!)");
    }
}
