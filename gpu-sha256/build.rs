use std::process::Command;

const DEFAULT_ARCH: &str = "compute_75";

fn main() {
    println!("cargo:rerun-if-env-changed=GPU_SHA256_ARCH");

    // The kernel is compiled at runtime by NVRTC, so a missing toolkit
    // only matters when the verifier actually runs.
    match which::which("nvcc") {
        Ok(path) => println!("cargo:warning=Found nvcc at: {}", path.display()),
        Err(_) => println!(
            "cargo:warning=nvcc not found in PATH; the CUDA driver and NVRTC are still needed at runtime"
        ),
    }

    let arch = std::env::var("GPU_SHA256_ARCH")
        .ok()
        .filter(|a| a.starts_with("compute_"))
        .or_else(detect_gpu_compute_capability)
        .unwrap_or_else(|| DEFAULT_ARCH.to_string());

    println!("cargo:rustc-env=GPU_SHA256_ARCH={}", arch);
}

fn detect_gpu_compute_capability() -> Option<String> {
    let output = Command::new("nvidia-smi")
        .args(["--query-gpu=compute_cap", "--format=csv,noheader"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let cap = String::from_utf8_lossy(&output.stdout)
        .trim()
        .lines()
        .next()?
        .to_string();

    // "8.9" -> "compute_89"
    let cleaned = cap.replace('.', "");
    let arch_num: u32 = cleaned.parse().ok()?;

    // Cap at compute_90 for CUDA 12.x NVRTC
    let arch = if arch_num > 90 {
        println!("cargo:warning=GPU reports compute capability {}, capping at compute_90", cap);
        "compute_90".to_string()
    } else {
        format!("compute_{}", cleaned)
    };

    println!("cargo:warning=Compiling kernel for: {}", arch);
    Some(arch)
}
