//! CUDA source for the SHA-256 kernel and its NVRTC compilation.

use cudarc::nvrtc::{compile_ptx_with_opts, CompileError, CompileOptions, Ptx};

use crate::error::{Result, VerifyError};

/// Exported kernel entry point
pub const ENTRY_POINT: &str = "sha256_digest";

/// Virtual architecture detected by the build script
pub const TARGET_ARCH: &str = env!("GPU_SHA256_ARCH");

/// Every work-item hashes the whole key, runs `passes - 1` extra
/// SHA-256 rounds over the 32-byte result, and writes its digest to
/// `out[gid * 32]`.
pub const SHA256_KERNEL: &str = r#"
__constant__ unsigned int K[64] = {
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2
};

#define ROTR32(x, n) (((x) >> (n)) | ((x) << (32 - (n))))

__device__ void sha256_compress(unsigned int *state, const unsigned char *block) {
    unsigned int w[64];
    for (int i = 0; i < 16; ++i) {
        w[i] = ((unsigned int)block[i * 4] << 24)
             | ((unsigned int)block[i * 4 + 1] << 16)
             | ((unsigned int)block[i * 4 + 2] << 8)
             | ((unsigned int)block[i * 4 + 3]);
    }
    for (int i = 16; i < 64; ++i) {
        unsigned int s0 = ROTR32(w[i - 15], 7) ^ ROTR32(w[i - 15], 18) ^ (w[i - 15] >> 3);
        unsigned int s1 = ROTR32(w[i - 2], 17) ^ ROTR32(w[i - 2], 19) ^ (w[i - 2] >> 10);
        w[i] = w[i - 16] + s0 + w[i - 7] + s1;
    }

    unsigned int a = state[0], b = state[1], c = state[2], d = state[3];
    unsigned int e = state[4], f = state[5], g = state[6], h = state[7];

    for (int i = 0; i < 64; ++i) {
        unsigned int s1 = ROTR32(e, 6) ^ ROTR32(e, 11) ^ ROTR32(e, 25);
        unsigned int ch = (e & f) ^ (~e & g);
        unsigned int t1 = h + s1 + ch + K[i] + w[i];
        unsigned int s0 = ROTR32(a, 2) ^ ROTR32(a, 13) ^ ROTR32(a, 22);
        unsigned int maj = (a & b) ^ (a & c) ^ (b & c);
        unsigned int t2 = s0 + maj;
        h = g; g = f; f = e; e = d + t1;
        d = c; c = b; b = a; a = t1 + t2;
    }

    state[0] += a; state[1] += b; state[2] += c; state[3] += d;
    state[4] += e; state[5] += f; state[6] += g; state[7] += h;
}

__device__ void sha256(const unsigned char *msg, unsigned long long len, unsigned char *digest) {
    unsigned int state[8] = {
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
        0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19
    };
    unsigned char block[64];

    unsigned long long full = len / 64;
    for (unsigned long long n = 0; n < full; ++n) {
        sha256_compress(state, msg + n * 64);
    }

    unsigned int rem = (unsigned int)(len % 64);
    for (unsigned int i = 0; i < rem; ++i) {
        block[i] = msg[full * 64 + i];
    }
    block[rem] = 0x80;
    for (unsigned int i = rem + 1; i < 64; ++i) {
        block[i] = 0;
    }
    if (rem >= 56) {
        sha256_compress(state, block);
        for (int i = 0; i < 56; ++i) {
            block[i] = 0;
        }
    }

    unsigned long long bits = len * 8;
    for (int i = 0; i < 8; ++i) {
        block[63 - i] = (unsigned char)(bits >> (8 * i));
    }
    sha256_compress(state, block);

    for (int i = 0; i < 8; ++i) {
        digest[i * 4]     = (unsigned char)(state[i] >> 24);
        digest[i * 4 + 1] = (unsigned char)(state[i] >> 16);
        digest[i * 4 + 2] = (unsigned char)(state[i] >> 8);
        digest[i * 4 + 3] = (unsigned char)(state[i]);
    }
}

extern "C" __global__ void sha256_digest(
    unsigned int key_len,
    const unsigned char *key,
    unsigned char *out,
    unsigned int work_items,
    unsigned int passes
) {
    unsigned int gid = blockIdx.x * blockDim.x + threadIdx.x;
    if (gid >= work_items) {
        return;
    }

    unsigned char digest[32];
    sha256(key, key_len, digest);

    for (unsigned int p = 1; p < passes; ++p) {
        unsigned char prev[32];
        for (int i = 0; i < 32; ++i) {
            prev[i] = digest[i];
        }
        sha256(prev, 32, digest);
    }

    unsigned char *dst = out + (unsigned long long)gid * 32;
    for (int i = 0; i < 32; ++i) {
        dst[i] = digest[i];
    }
}
"#;

/// Compile [`SHA256_KERNEL`] to PTX for [`TARGET_ARCH`]
pub fn compile() -> Result<Ptx> {
    log::debug!("Compiling {} for {}", ENTRY_POINT, TARGET_ARCH);

    let opts = CompileOptions {
        arch: Some(TARGET_ARCH),
        ..Default::default()
    };

    if !unsafe { cudarc::nvrtc::sys::is_culib_present() } {
        return Err(VerifyError::DeviceUnavailable(
            "NVRTC library could not be loaded".to_string(),
        ));
    }

    compile_ptx_with_opts(SHA256_KERNEL, opts).map_err(|e| VerifyError::KernelCompileError {
        diagnostics: compile_diagnostics(e),
    })
}

fn compile_diagnostics(err: CompileError) -> String {
    match err {
        CompileError::CompileError { log, .. } => log.to_string_lossy().into_owned(),
        other => other.to_string(),
    }
}
