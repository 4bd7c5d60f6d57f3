//! JSON-Schema pre-flight gate.
//!
//! The schema contract is consumed, not redesigned: a `schema.json` document
//! co-located with the payload is compiled once and every payload must pass
//! it before the pipeline performs any remote call.

use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::{io_err, PayloadError};

/// A compiled schema contract.
#[derive(Debug)]
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// Compile a schema from a JSON value.
    pub fn from_value(schema: &Value) -> Result<Self, PayloadError> {
        let compiled = JSONSchema::compile(schema).map_err(|e| PayloadError::SchemaCompile {
            path: Path::new("<inline>").to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { compiled })
    }

    /// Read and compile `schema.json` from disk.
    pub fn from_file(path: &Path) -> Result<Self, PayloadError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let schema: Value =
            serde_json::from_str(&contents).map_err(|source| PayloadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let compiled = JSONSchema::compile(&schema).map_err(|e| PayloadError::SchemaCompile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { compiled })
    }

    /// Validate a payload document against the contract.
    ///
    /// Collects every violation (with its instance path) rather than stopping
    /// at the first, so the operator sees the whole picture in one run.
    pub fn validate(&self, payload: &Value) -> Result<(), PayloadError> {
        if let Err(errors) = self.compiled.validate(payload) {
            let violations: Vec<String> = errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect();
            return Err(PayloadError::SchemaViolation { violations });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
