//! Accrual Configuration Layer
//!
//! Settings that steer sensitivity calculations rather than market data:
//! finite-difference bump sizes, comparison tolerances and the batch size at
//! which pricing goes parallel.
//!
//! Configurations are plain `serde` structs with per-field defaults, loaded
//! from JSON or TOML and checked through the [`Validate`] trait.
//!
//! # Example
//!
//! ```rust
//! use accrual_config::{SensitivityConfig, Validate};
//!
//! let config = SensitivityConfig::from_json_str(r#"{ "bump_size": 1e-7 }"#).unwrap();
//! assert!(config.central_difference);
//!
//! let broken = SensitivityConfig::default().with_tolerance(-1.0);
//! assert!(broken.validate_or_error().is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod sensitivity;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use sensitivity::SensitivityConfig;
