//! Domain types for the billing sync pipeline.
//!
//! `BillNo` is the natural key: a business-meaningful identifier used for
//! remote lookup in place of the store's opaque record identity. At most one
//! Bill record exists per `BillNo` value (see the upsert contract in
//! billsync-pipeline).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed bill number — the natural key of a Bill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillNo(pub String);

impl BillNo {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BillNo {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BillNo {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a Bill.
///
/// `Draft` and `Confirmed` are the two states the pipeline knows about; any
/// other value the remote store holds is carried through opaquely in
/// [`BillStatus::Other`] and never transitioned by this pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillStatus {
    Draft,
    Confirmed,
    Other(String),
}

impl BillStatus {
    pub fn is_draft(&self) -> bool {
        matches!(self, BillStatus::Draft)
    }

    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Draft => "Draft",
            BillStatus::Confirmed => "Confirmed",
            BillStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for BillStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Draft" => BillStatus::Draft,
            "Confirmed" => BillStatus::Confirmed,
            _ => BillStatus::Other(s),
        }
    }
}

impl From<&str> for BillStatus {
    fn from(s: &str) -> Self {
        BillStatus::from(s.to_owned())
    }
}

impl From<BillStatus> for String {
    fn from(status: BillStatus) -> Self {
        status.as_str().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_no_display() {
        assert_eq!(BillNo::from("B-001").to_string(), "B-001");
    }

    #[test]
    fn bill_no_equality() {
        let a = BillNo::from("x");
        let b = BillNo::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn status_known_values_round_trip() {
        assert_eq!(BillStatus::from("Draft"), BillStatus::Draft);
        assert_eq!(BillStatus::from("Confirmed"), BillStatus::Confirmed);
        assert_eq!(BillStatus::Draft.to_string(), "Draft");
        assert_eq!(BillStatus::Confirmed.to_string(), "Confirmed");
    }

    #[test]
    fn status_unknown_values_carried_opaquely() {
        let status = BillStatus::from("Cancelled");
        assert_eq!(status, BillStatus::Other("Cancelled".to_owned()));
        assert_eq!(status.to_string(), "Cancelled");
        assert!(!status.is_draft());
    }

    #[test]
    fn status_serde_uses_plain_strings() {
        let json = serde_json::to_string(&BillStatus::Draft).unwrap();
        assert_eq!(json, r#""Draft""#);
        let back: BillStatus = serde_json::from_str(r#""Archived""#).unwrap();
        assert_eq!(back, BillStatus::Other("Archived".to_owned()));
    }
}
