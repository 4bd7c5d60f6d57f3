//! Read-back of server-computed aggregates.
//!
//! The store computes rollups asynchronously after item creation, so a read
//! immediately following `create_all` may reflect a pre-creation aggregate.
//! The pipeline accepts that staleness; the summary reports the snapshot the
//! decision was made on.
//!
//! "Not yet computed", "not configured" and "bill not found" all read as the
//! zero rollup — callers must treat zero as "no information", never as a
//! confirmed empty bill.

use serde::{Deserialize, Serialize};

use billsync_core::BillNo;
use billsync_store::{FieldValue, Record, RecordStore, RemoteError};

use crate::bills::BillRepository;
use crate::fields;

/// Aggregate view over the items referencing one Bill.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rollup {
    pub items_count: u64,
    pub total_amount: f64,
}

/// Reads rollup fields off the Bill record.
pub struct RollupReader<'a, S: RecordStore> {
    bills: &'a BillRepository<'a, S>,
}

impl<'a, S: RecordStore> RollupReader<'a, S> {
    pub fn new(bills: &'a BillRepository<'a, S>) -> Self {
        Self { bills }
    }

    /// Resolve the bill and extract its aggregate fields, defaulting each to
    /// zero when absent or of an unexpected shape. Only a remote failure is
    /// an error; an unresolvable bill reads as the empty rollup.
    pub fn read(&self, bill_no: &BillNo) -> Result<Rollup, RemoteError> {
        let Some(record) = self.bills.find_by_number(bill_no)? else {
            tracing::warn!("bill {bill_no} not found while reading rollups; reporting zero");
            return Ok(Rollup::default());
        };
        Ok(extract(&record))
    }
}

fn extract(record: &Record) -> Rollup {
    let number = |field: &str| {
        record
            .properties
            .get(field)
            .and_then(FieldValue::rollup_number)
            .unwrap_or(0.0)
    };
    Rollup {
        items_count: number(fields::ITEMS_COUNT).max(0.0) as u64,
        total_amount: number(fields::TOTAL_AMOUNT),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
