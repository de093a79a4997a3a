use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("No usable CUDA device: {0}")]
    DeviceUnavailable(String),

    #[error("SHA-256 kernel failed to compile:\n{diagnostics}")]
    KernelCompileError { diagnostics: String },

    #[error("Device buffer transfer failed: {0}")]
    BufferTransferError(String),

    #[error("CUDA kernel launch failed: {0}")]
    KernelLaunchFailed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, VerifyError>;
