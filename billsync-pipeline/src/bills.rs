//! Natural-key lookup and upsert of the Bill entity.
//!
//! ## Upsert contract
//!
//! Lookup by `bill_no`, then patch the header fields on the existing record
//! or create a new one. This is the idempotency boundary of the pipeline:
//! repeated calls with the same data converge to one record with the latest
//! fields (last-write-wins, no concurrency check).
//!
//! ## Race window
//!
//! The store has no conditional write, so two concurrent runs for the same
//! `bill_no` can both observe "no existing bill" and both create one. The
//! pipeline assumes single-writer, non-overlapping invocation per bill; that
//! assumption must be enforced by the operator.

use billsync_core::{BillHeader, BillNo, BillStatus};
use billsync_store::{
    CollectionId, FieldMap, FieldValue, Filter, Record, RecordId, RecordStore, RemoteError,
};

use crate::fields;

/// Outcome of an upsert: which write path ran, carrying the record identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created { id: RecordId },
    Updated { id: RecordId },
}

impl UpsertOutcome {
    pub fn id(&self) -> &RecordId {
        match self {
            UpsertOutcome::Created { id } | UpsertOutcome::Updated { id } => id,
        }
    }
}

/// Repository for the Bill collection.
pub struct BillRepository<'a, S: RecordStore> {
    store: &'a S,
    collection: &'a CollectionId,
}

impl<'a, S: RecordStore> BillRepository<'a, S> {
    pub fn new(store: &'a S, collection: &'a CollectionId) -> Self {
        Self { store, collection }
    }

    /// Equality lookup on the `Bill No` title field. One remote round trip.
    pub fn find_by_number(&self, bill_no: &BillNo) -> Result<Option<Record>, RemoteError> {
        self.store.find(
            self.collection,
            &Filter::title_equals(fields::BILL_NO, bill_no.as_str()),
        )
    }

    /// Create-if-absent, update-if-present, keyed by `bill_no`.
    ///
    /// After a successful upsert, [`find_by_number`](Self::find_by_number)
    /// returns a record reflecting the given header fields.
    pub fn upsert(&self, bill: &BillHeader) -> Result<UpsertOutcome, RemoteError> {
        let header = header_fields(bill);
        match self.find_by_number(&bill.bill_no)? {
            Some(existing) => {
                self.store.patch(&existing.id, header)?;
                tracing::info!("updated bill {}", bill.bill_no);
                Ok(UpsertOutcome::Updated { id: existing.id })
            }
            None => {
                let record = self.store.create(self.collection, header)?;
                tracing::info!("created bill {}", bill.bill_no);
                Ok(UpsertOutcome::Created { id: record.id })
            }
        }
    }

    /// Patch only the status field of an existing bill record.
    pub fn set_status(&self, id: &RecordId, status: &BillStatus) -> Result<(), RemoteError> {
        let mut update = FieldMap::new();
        update.insert(
            fields::STATUS.to_owned(),
            FieldValue::select(status.as_str()),
        );
        self.store.patch(id, update)?;
        Ok(())
    }
}

fn header_fields(bill: &BillHeader) -> FieldMap {
    FieldMap::from([
        (
            fields::BILL_NO.to_owned(),
            FieldValue::title(bill.bill_no.as_str()),
        ),
        (
            fields::BILL_DATE.to_owned(),
            FieldValue::date(bill.bill_date.to_string()),
        ),
        (
            fields::CUSTOMER.to_owned(),
            FieldValue::rich_text(bill.customer.as_str()),
        ),
        (
            fields::STATUS.to_owned(),
            FieldValue::select(bill.status.as_str()),
        ),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
