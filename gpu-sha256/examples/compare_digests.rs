/**
 * Compare host and GPU SHA-256 digests for a handful of keys
 */

use gpu_sha256::{DigestMode, HashVerifier, VerifierConfig};

fn main() {
    println!("=== Host vs GPU SHA-256 ===\n");

    let keys: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"A".to_vec(),
        b"hello".to_vec(),
        hex::decode("417e5d84f2dc1a1167fa188d25ba76ca1b73026656").unwrap(),
        vec![0x5a; 64],
    ];

    let mut all_match = true;

    for mode in [DigestMode::Single, DigestMode::Double] {
        let verifier = match HashVerifier::new(VerifierConfig::default().mode(mode)) {
            Ok(v) => v,
            Err(e) => {
                println!("Could not set up verifier: {}", e);
                std::process::exit(2);
            }
        };

        println!("Mode: {}", mode);
        for (i, key) in keys.iter().enumerate() {
            let result = match verifier.verify(key) {
                Ok(r) => r,
                Err(e) => {
                    println!("  Key {}: error: {}", i + 1, e);
                    std::process::exit(2);
                }
            };

            let matches = result.is_match();
            all_match = all_match && matches;

            let status = if matches { "✓" } else { "✗" };
            println!("  {} Key {} ({} bytes) - {}",
                     status, i + 1, key.len(),
                     if matches { "MATCH" } else { "MISMATCH!" });

            if !matches {
                println!("    CPU: {}", result.host_digest);
                println!("    GPU: {}", result.device_digest);
            }
        }
        println!();
    }

    println!("{}", "═".repeat(60));
    if all_match {
        println!("All digests match");
    } else {
        println!("GPU and CPU produce different results!");
        println!("{}", "═".repeat(60));
        std::process::exit(1);
    }
}
