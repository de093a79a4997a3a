use crate::digest::DigestMode;
use crate::error::{Result, VerifyError};

/// Work-item grid for one kernel dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchShape {
    /// Total number of work-items (global size)
    pub work_items: u32,

    /// Work-items per block (work-group size)
    pub block_size: u32,
}

impl Default for LaunchShape {
    fn default() -> Self {
        Self {
            work_items: 1,
            block_size: 1,
        }
    }
}

impl LaunchShape {
    pub fn new(work_items: u32, block_size: u32) -> Result<Self> {
        let shape = Self {
            work_items,
            block_size,
        };
        shape.validate()?;
        Ok(shape)
    }

    pub fn validate(&self) -> Result<()> {
        if self.work_items == 0 {
            return Err(VerifyError::InvalidParameter(
                "work_items must be at least 1".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(VerifyError::InvalidParameter(
                "block_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of blocks needed to cover every work-item
    pub fn grid_size(&self) -> u32 {
        self.work_items.div_ceil(self.block_size)
    }

    /// Bytes needed to hold one digest per work-item
    pub fn output_len(&self) -> usize {
        self.work_items as usize * crate::digest::DIGEST_LEN
    }
}

/// Configuration for a [`HashVerifier`](crate::HashVerifier)
#[derive(Debug, Clone, Default)]
pub struct VerifierConfig {
    /// CUDA device ordinal (default: 0)
    pub device_ordinal: usize,

    /// Dispatch shape (default: one work-item)
    pub launch: LaunchShape,

    /// Single or double SHA-256 (default: single)
    pub mode: DigestMode,
}

impl VerifierConfig {
    pub fn with_params(device_ordinal: usize, work_items: u32, block_size: u32) -> Result<Self> {
        Ok(Self {
            device_ordinal,
            launch: LaunchShape::new(work_items, block_size)?,
            mode: DigestMode::Single,
        })
    }

    pub fn mode(mut self, mode: DigestMode) -> Self {
        self.mode = mode;
        self
    }
}
