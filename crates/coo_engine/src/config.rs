//! Engine startup configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Kernels to load when the engine starts.
///
/// Paths ending in `.json` are ephemeris segment files; anything else is
/// read as a NAIF text kernel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub kernel_paths: Vec<PathBuf>,
}

impl EngineConfig {
    pub fn new(kernel_paths: Vec<PathBuf>) -> Self {
        Self { kernel_paths }
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if self.kernel_paths.is_empty() {
            return Err(EngineError::InvalidConfig("kernel_paths must not be empty"));
        }
        for path in &self.kernel_paths {
            if path.as_os_str().is_empty() {
                return Err(EngineError::InvalidConfig(
                    "kernel_paths must not contain empty paths",
                ));
            }
        }
        Ok(())
    }
}
