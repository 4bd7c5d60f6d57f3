//! Error types for billsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from payload loading and contract validation.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Underlying I/O failure reading the payload or schema document.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A validated document did not decode into the typed payload shape.
    #[error("payload shape error: {source}")]
    Shape {
        #[source]
        source: serde_json::Error,
    },

    /// The schema document itself is not a valid JSON Schema.
    #[error("invalid schema at {path}: {message}")]
    SchemaCompile { path: PathBuf, message: String },

    /// The payload violates the schema contract. Raised before any remote
    /// mutation; fatal to the run.
    #[error("schema validation failed: {}", violations.join("; "))]
    SchemaViolation { violations: Vec<String> },
}

/// Convenience constructor for [`PayloadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PayloadError {
    PayloadError::Io {
        path: path.into(),
        source,
    }
}
