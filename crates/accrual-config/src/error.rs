//! Configuration errors and the [`Validate`] trait.

use thiserror::Error;

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document parsed but one or more settings are out of range.
    #[error("Invalid configuration: {}", join(.errors))]
    Invalid {
        /// Every failed check, in field order.
        errors: Vec<ValidationError>,
    },

    /// The document is not valid JSON or TOML for the target type.
    #[error("Could not parse {format} configuration: {message}")]
    Parse {
        /// `"json"` or `"toml"`.
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
    },

    /// The file could not be read.
    #[error("Failed to read {path}: {message}")]
    Io {
        /// The path being read.
        path: String,
        /// The I/O error message.
        message: String,
    },
}

impl ConfigError {
    /// Names of the fields that failed validation; empty for other errors.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            Self::Invalid { errors } => errors.iter().map(|e| e.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            format: "json",
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse {
            format: "toml",
            message: err.to_string(),
        }
    }
}

/// One failed check on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field name as it appears in the document.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
    /// Short rule identifier, e.g. `positive_finite`.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates an error without a rule identifier.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates an error tagged with a rule identifier.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            rule: Some(rule.into()),
            ..Self::new(field, message)
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(rule) = &self.rule {
            write!(f, " [{rule}]")?;
        }
        Ok(())
    }
}

/// Range checks on a deserialized configuration.
pub trait Validate {
    /// Every failed check; empty when the configuration is usable.
    fn validate(&self) -> Vec<ValidationError>;

    /// True when [`Validate::validate`] finds nothing.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Turns failed checks into [`ConfigError::Invalid`].
    fn validate_or_error(&self) -> ConfigResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { errors })
        }
    }
}
