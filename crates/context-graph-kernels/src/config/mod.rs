//! Kernel configuration.
//!
//! `KernelConfig` controls the lane width the kernels run at, the z-score
//! epsilon and the corpus size at which batch similarity goes parallel.
//!
//! # Loading Configuration
//!
//! ```rust,ignore
//! use context_graph_kernels::KernelConfig;
//!
//! // Load from file
//! let config = KernelConfig::from_file("kernels.toml")?;
//!
//! // Or use defaults (probed lane width)
//! let config = KernelConfig::default();
//!
//! // With environment overrides
//! let config = KernelConfig::default().with_env_overrides();
//! ```
//!
//! # TOML Structure
//!
//! ```toml
//! lane_width = 8            # omit to use the probed width
//! zscore_epsilon = 1e-8
//! parallel_threshold = 1024
//! ```
//!
//! Invalid values are rejected by `validate()`, never silently replaced.


use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::lanes::MAX_LANES;

/// Default epsilon added to the z-score denominator.
pub const DEFAULT_ZSCORE_EPSILON: f32 = 1e-8;

/// Default corpus size at which batch similarity is scored with rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

fn default_zscore_epsilon() -> f32 {
    DEFAULT_ZSCORE_EPSILON
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

/// Configuration for the kernel context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Lane width override. `None` uses the probed width; `Some(1)` forces
    /// the scalar path.
    /// Default: None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_width: Option<usize>,

    /// Epsilon added to the standard deviation in z-score standardization.
    /// Default: 1e-8
    #[serde(default = "default_zscore_epsilon")]
    pub zscore_epsilon: f32,

    /// Corpus size at or above which batch similarity runs in parallel.
    /// Default: 1024
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            lane_width: None,
            zscore_epsilon: DEFAULT_ZSCORE_EPSILON,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl KernelConfig {
    /// Configuration that pins every kernel to the scalar path.
    pub fn scalar_only() -> Self {
        Self {
            lane_width: Some(1),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `KernelError::ConfigError` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> KernelResult<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| KernelError::ConfigError {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        toml::from_str(&contents).map_err(|e| KernelError::ConfigError {
            message: format!("Failed to parse TOML in '{}': {}", path.display(), e),
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// - `KernelError::ConfigError` if TOML parsing fails
    pub fn from_toml_str(toml: &str) -> KernelResult<Self> {
        toml::from_str(toml).map_err(|e| KernelError::ConfigError {
            message: format!("Failed to parse TOML: {}", e),
        })
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    /// - `KernelError::ConfigError` if serialization fails
    pub fn to_toml_string(&self) -> KernelResult<String> {
        toml::to_string_pretty(self).map_err(|e| KernelError::ConfigError {
            message: format!("Failed to serialize to TOML: {}", e),
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `KernelError::ConfigError` if:
    /// - `lane_width` is 0 or greater than `MAX_LANES`
    /// - `zscore_epsilon` is not finite or not positive
    pub fn validate(&self) -> KernelResult<()> {
        if let Some(width) = self.lane_width {
            if width == 0 || width > MAX_LANES {
                return Err(KernelError::ConfigError {
                    message: format!("lane_width must be in 1..={}, got {}", MAX_LANES, width),
                });
            }
        }
        if !self.zscore_epsilon.is_finite() || self.zscore_epsilon <= 0.0 {
            return Err(KernelError::ConfigError {
                message: format!(
                    "zscore_epsilon must be finite and > 0.0, got {}",
                    self.zscore_epsilon
                ),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable values are ignored.
    ///
    /// | Variable | Field | Type |
    /// |----------|-------|------|
    /// | `KERNELS_LANE_WIDTH` | `lane_width` | usize |
    /// | `KERNELS_ZSCORE_EPSILON` | `zscore_epsilon` | f32 |
    /// | `KERNELS_PARALLEL_THRESHOLD` | `parallel_threshold` | usize |
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var("KERNELS_LANE_WIDTH") {
            if let Ok(n) = val.parse::<usize>() {
                self.lane_width = Some(n);
            }
        }
        if let Ok(val) = env::var("KERNELS_ZSCORE_EPSILON") {
            if let Ok(eps) = val.parse::<f32>() {
                self.zscore_epsilon = eps;
            }
        }
        if let Ok(val) = env::var("KERNELS_PARALLEL_THRESHOLD") {
            if let Ok(n) = val.parse::<usize>() {
                self.parallel_threshold = n;
            }
        }
        self
    }
}
