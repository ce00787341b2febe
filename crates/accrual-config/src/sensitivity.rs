//! Finite-difference and batch settings for sensitivity calculations.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Settings for bump-and-reprice checks and batch pricing.
///
/// Every field has a default, so an empty document deserializes to
/// [`SensitivityConfig::default`].
///
/// # Example
///
/// ```rust
/// use accrual_config::{SensitivityConfig, Validate};
///
/// let config = SensitivityConfig::from_toml_str("bump_size = 1e-5\ncentral_difference = false").unwrap();
/// assert_eq!(config.bump_size, 1e-5);
/// assert!(!config.central_difference);
/// assert_eq!(config.parallel_threshold, 64);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    /// Zero-rate or forward shift used when bumping curves.
    #[serde(default = "default_bump_size")]
    pub bump_size: f64,

    /// Central (`±h`) rather than one-sided differences.
    #[serde(default = "default_central_difference")]
    pub central_difference: bool,

    /// Relative tolerance when comparing analytic and bumped sensitivities.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Batch size at or above which batch pricing runs in parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_bump_size() -> f64 {
    1e-6
}

fn default_central_difference() -> bool {
    true
}

fn default_tolerance() -> f64 {
    1e-4
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            bump_size: default_bump_size(),
            central_difference: default_central_difference(),
            tolerance: default_tolerance(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl SensitivityConfig {
    /// Sets the bump size.
    #[must_use]
    pub fn with_bump_size(mut self, bump_size: f64) -> Self {
        self.bump_size = bump_size;
        self
    }

    /// Selects central or one-sided differences.
    #[must_use]
    pub fn with_central_difference(mut self, central: bool) -> Self {
        self.central_difference = central;
        self
    }

    /// Sets the comparison tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the parallel batch threshold.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(toml: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(toml)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.json` or `.toml` file, chosen by extension.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat { path: display }),
        }
    }
}

impl Validate for SensitivityConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.bump_size.is_finite() && self.bump_size > 0.0) {
            errors.push(ValidationError::with_rule(
                "bump_size",
                "Bump size must be positive and finite",
                "positive_finite",
            ));
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            errors.push(ValidationError::with_rule(
                "tolerance",
                "Tolerance must be positive and finite",
                "positive_finite",
            ));
        }

        errors
    }
}
