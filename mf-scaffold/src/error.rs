//! Error types for schema access, resolution and generation.
//!
//! Each concern has its own enum; [`ScaffoldError`] aggregates them so the
//! orchestrator can use `?` across all of them.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::SchemaElementKind;

/// Result type alias for scaffolding operations.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Result type alias for identifier resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Main error type for a generation run.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A schema element could not be read.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A reference could not be resolved.
    #[error("Failed to resolve reference: {0}")]
    Resolve(#[from] ResolveError),

    /// Generation was refused or failed.
    #[error("Failed to generate artifacts: {0}")]
    Generate(#[from] GenerateError),

    /// Persisting an artifact failed.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),
}

/// Error raised by a [`SchemaProvider`](crate::schema::SchemaProvider).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The lookup found nothing.
    #[error("{kind} not found: {reference}")]
    NotFound {
        kind: SchemaElementKind,
        reference: String,
    },

    /// The backing store could not answer.
    #[error("Schema unavailable: {message}")]
    Unavailable { message: String },

    /// A snapshot file did not parse.
    #[error("Invalid schema snapshot {path}: {message}")]
    InvalidSnapshot { path: PathBuf, message: String },

    /// IO error reading a snapshot.
    #[error("Failed to read schema snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error raised while resolving a reference to a numeric id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Every lookup strategy for the kind came back empty.
    #[error("Vault element not found. Type: {kind} Reference: {reference}")]
    NotFound {
        kind: SchemaElementKind,
        reference: String,
    },

    /// An identifier without a resolved id was coerced to an integer.
    #[error("{}", unresolved_message(.kind, .alias))]
    Unresolved {
        kind: Option<SchemaElementKind>,
        alias: String,
    },

    /// The reference has a shape no strategy understands.
    #[error("The identifier '{reference}' is not recognized")]
    Unrecognized { reference: String },

    /// The caller passed empty or contradictory input.
    #[error("Invalid argument: {message}")]
    Argument { message: String },

    /// The provider failed for a reason other than a missing element.
    #[error("Schema backend error: {message}")]
    Backend { message: String },
}

/// Error raised while planning or emitting artifacts.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A target file already exists and overwrite was not forced.
    #[error("File {} already exists, use --force to overwrite.", .path.display())]
    Conflict { path: PathBuf },

    /// The property's value kind has no accessor mapping.
    #[error("Generation of datatype {value_kind} not yet supported (property '{property}').")]
    UnsupportedValueKind { property: String, value_kind: String },

    /// Two schema elements sanitise to the same file.
    #[error("Artifact target {} is produced by more than one schema element", .path.display())]
    DuplicateTarget { path: PathBuf },
}

/// Error writing an artifact through a project writer.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Refused to replace a hand-editable partial.
    #[error("Refusing to overwrite hand-editable file {path}")]
    ProtectedPartial { path: PathBuf },
}

fn unresolved_message(kind: &Option<SchemaElementKind>, alias: &str) -> String {
    match kind {
        Some(kind) => format!("Vault element not found. Type:{kind} Alias:{alias}"),
        None => format!("Vault element not found. Alias:{alias}"),
    }
}

impl From<SchemaError> for ResolveError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::NotFound { kind, reference } => Self::NotFound { kind, reference },
            other => Self::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl ResolveError {
    /// Create an argument error.
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Create an unrecognized reference error.
    pub fn unrecognized(reference: impl Into<String>) -> Self {
        Self::Unrecognized {
            reference: reference.into(),
        }
    }

    /// Check whether this error means the element does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl SchemaError {
    /// Create a not found error.
    pub fn not_found(kind: SchemaElementKind, reference: impl ToString) -> Self {
        Self::NotFound {
            kind,
            reference: reference.to_string(),
        }
    }
}

impl GenerateError {
    /// Create a conflict error for a target path.
    pub fn conflict(path: impl Into<PathBuf>) -> Self {
        Self::Conflict { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_not_found_converts_to_resolve_not_found() {
        let err: ResolveError =
            SchemaError::not_found(SchemaElementKind::PropertyDefinition, "PD.Missing").into();
        assert_eq!(
            err,
            ResolveError::NotFound {
                kind: SchemaElementKind::PropertyDefinition,
                reference: "PD.Missing".to_string(),
            }
        );
    }

    #[test]
    fn test_backend_errors_keep_message() {
        let err: ResolveError = SchemaError::Unavailable {
            message: "connection reset".to_string(),
        }
        .into();
        assert!(matches!(err, ResolveError::Backend { ref message } if message.contains("connection reset")));
    }

    #[test]
    fn test_unresolved_message_mentions_kind_and_alias() {
        let err = ResolveError::Unresolved {
            kind: Some(SchemaElementKind::ObjectClass),
            alias: "CL.Invoice".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("ObjectClass"));
        assert!(message.contains("CL.Invoice"));

        let err = ResolveError::Unresolved {
            kind: None,
            alias: String::new(),
        };
        assert_eq!(err.to_string(), "Vault element not found. Alias:");
    }

    #[test]
    fn test_conflict_message_names_path() {
        let err = GenerateError::conflict("Models/ObjVerEx.cs");
        assert!(err.to_string().contains("Models/ObjVerEx.cs"));
    }
}
