//! Run-time configuration of the advection scheme.
//!
//! Configurations are plain serde structs and can be loaded from JSON. Every
//! field has a default, so a partial file (or `{}`) is valid.
//!
//! ```
//! use vof_rs::VofConfig;
//!
//! let config = VofConfig::from_json_str(r#"{ "use_lagrangian": true }"#).unwrap();
//! assert!(config.use_lagrangian);
//! assert!(config.remove_debris);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flux::AdvectionScheme;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON for this configuration.
    #[error("parse error: {0}")]
    Parse(String),

    /// A field holds a value outside its allowed range.
    #[error("invalid value for '{key}': {value} ({reason})")]
    InvalidValue {
        /// Field name
        key: String,
        /// Offending value
        value: String,
        /// Allowed range
        reason: String,
    },
}

fn default_remove_debris() -> bool {
    true
}

fn default_debris_threshold() -> f64 {
    1e-6
}

fn default_fraction_tolerance() -> f64 {
    1e-12
}

fn default_max_courant() -> f64 {
    1.0
}

/// Switches and tolerances of the VOF advection step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VofConfig {
    /// Use the Lagrangian remap for interfacial cells instead of the
    /// Eulerian one
    #[serde(default)]
    pub use_lagrangian: bool,

    /// Zero isolated near-empty cells after the third sweep
    #[serde(default = "default_remove_debris")]
    pub remove_debris: bool,

    /// Cells below this fraction with no full neighbour count as debris
    #[serde(default = "default_debris_threshold")]
    pub debris_threshold: f64,

    /// Fractions within this distance of 0 or 1 are snapped to 0 or 1
    #[serde(default = "default_fraction_tolerance")]
    pub fraction_tolerance: f64,

    /// Largest face Courant number before a warning is logged
    #[serde(default = "default_max_courant")]
    pub max_courant: f64,
}

impl Default for VofConfig {
    fn default() -> Self {
        Self {
            use_lagrangian: false,
            remove_debris: default_remove_debris(),
            debris_threshold: default_debris_threshold(),
            fraction_tolerance: default_fraction_tolerance(),
            max_courant: default_max_courant(),
        }
    }
}

impl VofConfig {
    /// Default configuration: Eulerian scheme with debris removal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the Lagrangian (`true`) or Eulerian (`false`) scheme.
    pub fn with_lagrangian(mut self, enabled: bool) -> Self {
        self.use_lagrangian = enabled;
        self
    }

    /// Enable or disable debris removal.
    pub fn with_debris_removal(mut self, enabled: bool) -> Self {
        self.remove_debris = enabled;
        self
    }

    /// Set the debris threshold.
    pub fn with_debris_threshold(mut self, threshold: f64) -> Self {
        self.debris_threshold = threshold;
        self
    }

    /// Set the empty/full snapping tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.fraction_tolerance = tolerance;
        self
    }

    /// Set the Courant number warning limit.
    pub fn with_max_courant(mut self, max_courant: f64) -> Self {
        self.max_courant = max_courant;
        self
    }

    /// Remap scheme selected by `use_lagrangian`.
    pub fn scheme(&self) -> AdvectionScheme {
        if self.use_lagrangian {
            AdvectionScheme::Lagrangian
        } else {
            AdvectionScheme::Eulerian
        }
    }

    /// Parse and validate a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: VofConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Check that every field lies in its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tol = self.fraction_tolerance;
        if !(tol > 0.0 && tol < 0.5) {
            return Err(invalid("fraction_tolerance", tol, "must lie in (0, 0.5)"));
        }
        if !(self.debris_threshold >= 0.0 && self.debris_threshold < 1.0 - tol) {
            return Err(invalid(
                "debris_threshold",
                self.debris_threshold,
                "must lie in [0, 1 - fraction_tolerance)",
            ));
        }
        if !(self.max_courant > 0.0 && self.max_courant <= 1.0) {
            return Err(invalid("max_courant", self.max_courant, "must lie in (0, 1]"));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: f64, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
