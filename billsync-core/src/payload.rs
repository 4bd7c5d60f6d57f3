//! Payload document shape and loading.
//!
//! A payload is a JSON object with a `bill` section and an `items` sequence:
//!
//! ```json
//! {
//!   "bill":  { "bill_no": "B-001", "bill_date": "2024-01-01",
//!              "customer": "Acme", "status": "Draft" },
//!   "items": [ { "type": "A", "number": "1", "amount": 50.0 } ]
//! }
//! ```
//!
//! Loading is two-phase on purpose: [`load_value`] reads the raw document so
//! the schema gate can run against it first, then [`Payload::from_value`]
//! decodes the typed shape. Nothing touches the remote store until both
//! phases pass.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{io_err, PayloadError};
use crate::types::{BillNo, BillStatus};

/// The `bill` section — header fields of the Bill entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillHeader {
    pub bill_no: BillNo,
    pub bill_date: NaiveDate,
    pub customer: String,
    pub status: BillStatus,
}

/// One entry of the `items` sequence.
///
/// `number` is a text identifier and is not guaranteed unique; items are an
/// append-only ledger, never deduplicated across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub number: String,
    pub amount: f64,
}

/// The full payload document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub bill: BillHeader,
    pub items: Vec<LineItem>,
}

impl Payload {
    /// Decode a (schema-validated) raw document into the typed shape.
    pub fn from_value(value: &Value) -> Result<Self, PayloadError> {
        serde_json::from_value(value.clone()).map_err(|source| PayloadError::Shape { source })
    }
}

/// Read a payload document from disk as raw JSON.
pub fn load_value(path: &Path) -> Result<Value, PayloadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|source| PayloadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
