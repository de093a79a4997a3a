//! Device backends that run the digest kernel.

use std::sync::Arc;

use cudarc::driver::{CudaContext, LaunchConfig, PushKernelArg};

use crate::config::LaunchShape;
use crate::digest::{Digest, DigestMode, DIGEST_LEN};
use crate::error::{Result, VerifyError};
use crate::kernel;

/// Something that can compute SHA-256 digests off the host.
///
/// Returns one digest per work-item in `launch`.
pub trait DigestBackend {
    fn name(&self) -> &str;

    fn digest(&self, key: &[u8], mode: DigestMode, launch: LaunchShape) -> Result<Vec<Digest>>;
}

/// Key length as the device-side `u32` count
pub fn device_key_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        VerifyError::InvalidParameter(format!(
            "key is {} bytes, device kernels accept at most {}",
            len,
            u32::MAX
        ))
    })
}

/// CUDA backend.
///
/// Holds only the device ordinal: context, stream, module and buffers
/// are created inside [`DigestBackend::digest`] and dropped before it
/// returns.
#[derive(Debug, Clone)]
pub struct CudaBackend {
    ordinal: usize,
}

impl CudaBackend {
    pub fn new(ordinal: usize) -> Self {
        Self { ordinal }
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn context(&self) -> Result<Arc<CudaContext>> {
        let ordinal = self.ordinal;

        if !unsafe { cudarc::driver::sys::is_culib_present() } {
            return Err(VerifyError::DeviceUnavailable(
                "CUDA driver library could not be loaded".to_string(),
            ));
        }

        CudaContext::new(ordinal).map_err(|e| {
            VerifyError::DeviceUnavailable(format!("device {}: {:?}", ordinal, e))
        })
    }
}

impl Default for CudaBackend {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DigestBackend for CudaBackend {
    fn name(&self) -> &str {
        "cuda"
    }

    fn digest(&self, key: &[u8], mode: DigestMode, launch: LaunchShape) -> Result<Vec<Digest>> {
        launch.validate()?;
        let key_len = device_key_len(key.len())?;

        let ctx = self.context()?;
        log::info!("Acquired CUDA device {}", self.ordinal);

        let ptx = kernel::compile()?;
        let module = ctx.load_module(ptx).map_err(|e| VerifyError::KernelCompileError {
            diagnostics: format!("module load failed: {:?}", e),
        })?;
        let func = module.load_function(kernel::ENTRY_POINT).map_err(|e| {
            VerifyError::KernelCompileError {
                diagnostics: format!("entry point {} not found: {:?}", kernel::ENTRY_POINT, e),
            }
        })?;

        let stream = ctx.default_stream();

        // Zero-byte allocations are rejected by the driver; the kernel
        // never reads past key_len so a placeholder byte is harmless.
        let staged: &[u8] = if key.is_empty() { &[0u8] } else { key };
        let d_key = stream.memcpy_stod(staged).map_err(|e| {
            VerifyError::BufferTransferError(format!("key upload ({} bytes): {:?}", key.len(), e))
        })?;
        let mut d_out = stream.alloc_zeros::<u8>(launch.output_len()).map_err(|e| {
            VerifyError::BufferTransferError(format!("output allocation: {:?}", e))
        })?;

        log::debug!(
            "Launching {} ({}) grid={} block={} work_items={}",
            kernel::ENTRY_POINT,
            mode,
            launch.grid_size(),
            launch.block_size,
            launch.work_items
        );

        let cfg = LaunchConfig {
            grid_dim: (launch.grid_size(), 1, 1),
            block_dim: (launch.block_size, 1, 1),
            shared_mem_bytes: 0,
        };
        let work_items = launch.work_items;
        let passes = mode.passes();

        unsafe {
            stream
                .launch_builder(&func)
                .arg(&key_len)
                .arg(&d_key)
                .arg(&mut d_out)
                .arg(&work_items)
                .arg(&passes)
                .launch(cfg)
                .map_err(|e| VerifyError::KernelLaunchFailed(format!("{:?}", e)))?;
        }

        stream
            .synchronize()
            .map_err(|e| VerifyError::KernelLaunchFailed(format!("stream sync: {:?}", e)))?;

        let host_out: Vec<u8> = stream
            .memcpy_dtov(&d_out)
            .map_err(|e| VerifyError::BufferTransferError(format!("digest download: {:?}", e)))?;

        let digests = host_out
            .chunks(DIGEST_LEN)
            .map(Digest::from_slice)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Read back {} digest(s) from device {}", digests.len(), self.ordinal);
        Ok(digests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_key_len_bounds() {
        assert_eq!(device_key_len(0).unwrap(), 0);
        assert_eq!(device_key_len(1).unwrap(), 1);
        assert_eq!(device_key_len(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_device_key_len_overflow() {
        let err = device_key_len(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, VerifyError::InvalidParameter(_)));
    }

    #[test]
    fn test_missing_driver_is_unavailable() {
        if unsafe { cudarc::driver::sys::is_culib_present() } {
            eprintln!("Skipping - CUDA driver is installed");
            return;
        }
        let err = CudaBackend::default()
            .digest(b"A", DigestMode::Single, LaunchShape::default())
            .unwrap_err();
        assert!(matches!(err, VerifyError::DeviceUnavailable(_)), "got {}", err);
    }

    #[test]
    fn test_backend_default_ordinal() {
        let backend = CudaBackend::default();
        assert_eq!(backend.ordinal(), 0);
        assert_eq!(backend.name(), "cuda");
    }
}
