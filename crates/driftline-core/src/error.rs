//! Error taxonomy for the reconciliation core.
//!
//! Every fallible operation in this workspace returns [`DriftError`]. The
//! variants map onto the four failure families of the engine: configuration
//! mistakes caught at construction, missing resources, corrupt input that
//! aborts a whole load, and programmer errors such as comparing an
//! undeclared field.

use std::path::PathBuf;
use thiserror::Error;

/// Standardized error type for the reconciliation engine.
#[derive(Debug, Error)]
pub enum DriftError {
    /// A required setting is missing or unusable. Fatal; raised at
    /// construction and never recovered.
    #[error("configuration error: {message}")]
    Configuration {
        /// What was missing or wrong.
        message: String,
    },

    /// A requested resource does not exist.
    #[error("{resource} not found{}", id.as_ref().map(|i| format!(": {i}")).unwrap_or_default())]
    NotFound {
        /// The kind of resource (e.g. "index file", "compact id").
        resource: String,
        /// Optional identifier of the resource.
        id: Option<String>,
    },

    /// Input that could not be understood. The whole load or parse aborts;
    /// bad rows are never skipped individually.
    #[error("invalid format in {context}: {message}")]
    InvalidFormat {
        /// What was being read (usually a path).
        context: String,
        /// What was wrong with it.
        message: String,
    },

    /// A required argument was empty or otherwise unusable.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        /// The argument name.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// A field comparison was requested for a field the entity type does
    /// not declare. This is a configuration bug, never a data error.
    #[error("field '{field}' is not supported for entity type '{entity}'")]
    FieldNotSupported {
        /// The entity type whose table was consulted.
        entity: &'static str,
        /// The undeclared field name.
        field: String,
    },

    /// An I/O failure in the durable storage collaborator.
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A failure reported by the relational collaborator.
    #[error("repository error: {message}")]
    Repository {
        /// The collaborator's description of the failure.
        message: String,
    },
}

impl DriftError {
    /// Shorthand for a [`DriftError::NotFound`] without an identifier.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        DriftError::NotFound {
            resource: resource.into(),
            id: None,
        }
    }

    /// Shorthand for a [`DriftError::NotFound`] naming the resource.
    #[must_use]
    pub fn not_found_id(resource: impl Into<String>, id: impl ToString) -> Self {
        DriftError::NotFound {
            resource: resource.into(),
            id: Some(id.to_string()),
        }
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DriftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_without_id() {
        let err = DriftError::not_found("index file");
        assert_eq!(err.to_string(), "index file not found");
    }

    #[test]
    fn not_found_display_with_id() {
        let err = DriftError::not_found_id("compact id", 17);
        assert_eq!(err.to_string(), "compact id not found: 17");
    }

    #[test]
    fn field_not_supported_names_entity_and_field() {
        let err = DriftError::FieldNotSupported {
            entity: "component",
            field: "color".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("component"));
        assert!(display.contains("color"));
    }

    #[test]
    fn storage_error_chains_the_source() {
        let err = DriftError::Storage {
            path: PathBuf::from("/tmp/index.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/index.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn question_mark_propagation() {
        fn inner() -> Result<()> {
            Err(DriftError::Configuration {
                message: "index path is empty".to_string(),
            })
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        assert!(outer().is_err());
    }
}
