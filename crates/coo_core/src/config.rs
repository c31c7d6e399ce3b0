//! Transformation settings and the combined JSON configuration file.

use std::path::{Path, PathBuf};

use coo_engine::{Aberration, EngineConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default lower bound on `|uz × u_support|` for a usable basis.
pub const DEFAULT_PARALLEL_TOLERANCE: f64 = 1e-10;

/// Settings of the relative-state basis builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub aberration: Aberration,
    pub parallel_tolerance: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            aberration: Aberration::None,
            parallel_tolerance: DEFAULT_PARALLEL_TOLERANCE,
        }
    }
}

impl TransformConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.parallel_tolerance.is_finite() && self.parallel_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(
                "parallel_tolerance must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Everything a front end needs to build an engine and run transforms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CooConfig {
    pub engine: EngineConfig,
    pub transform: TransformConfig,
}

impl CooConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.transform.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = TransformConfig::default();
        assert_eq!(c.aberration, Aberration::None);
        assert_eq!(c.parallel_tolerance, 1e-10);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: CooConfig = serde_json::from_str(
            r#"{ "engine": { "kernel_paths": ["a.tpc"] }, "transform": { "aberration": "LT" } }"#,
        )
        .unwrap();
        assert_eq!(c.engine.kernel_paths, vec![PathBuf::from("a.tpc")]);
        assert_eq!(c.transform.aberration, Aberration::LightTime);
        assert_eq!(c.transform.parallel_tolerance, DEFAULT_PARALLEL_TOLERANCE);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let c = TransformConfig {
            parallel_tolerance: -1.0,
            ..TransformConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file() {
        let err = CooConfig::from_json_file(Path::new("/nonexistent/coo.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
