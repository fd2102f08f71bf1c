//! Error types for the CLI.
//!
//! Library failures arrive as [`ScaffoldError`]; configuration and
//! argument problems are the CLI's own.

use std::path::PathBuf;
use thiserror::Error;

use mf_scaffold::{ResolveError, ScaffoldError, SchemaError, WriteError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from the generation pipeline.
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// The run was refused before touching the project (existing files,
    /// missing snapshot, bad arguments).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<SchemaError> for CliError {
    fn from(err: SchemaError) -> Self {
        Self::Scaffold(err.into())
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        Self::Scaffold(err.into())
    }
}

impl From<WriteError> for CliError {
    fn from(err: WriteError) -> Self {
        Self::Scaffold(err.into())
    }
}

impl CliError {
    /// Whether the failure is a refused precondition rather than a crash.
    /// Such failures exit with status 2.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CliError::Validation(_)
                | CliError::Scaffold(ScaffoldError::Generate(
                    mf_scaffold::GenerateError::Conflict { .. }
                ))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_scaffold::GenerateError;

    #[test]
    fn test_conflict_is_validation() {
        let err: CliError = ScaffoldError::from(GenerateError::conflict("Models/ObjVerEx.cs")).into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Models/ObjVerEx.cs"));
    }

    #[test]
    fn test_schema_error_is_not_validation() {
        let err: CliError = SchemaError::Unavailable {
            message: "offline".to_string(),
        }
        .into();
        assert!(!err.is_validation());
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::invalid_value("generation.indent", "unknown style");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'generation.indent': unknown style"
        );
    }
}
