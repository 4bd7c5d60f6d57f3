//! Creation of BillItem records under a parent Bill reference.
//!
//! `create_all` is **not atomic** and **not idempotent**: each item is an
//! independent remote create, in payload order. If item *k* fails, items
//! `1..k-1` stay committed server-side and `k+1..n` are never attempted.
//! Re-invoking with the same list re-creates the committed prefix as
//! duplicates — items are an append-only ledger with no deduplication by
//! `(bill_no, number)`. That is the consumed product behavior; changing it
//! needs an explicit product decision, not a quiet fix here.

use billsync_core::{BillNo, LineItem};
use billsync_store::{CollectionId, FieldMap, FieldValue, RecordId, RecordStore};

use crate::bills::BillRepository;
use crate::error::PipelineError;
use crate::fields;

/// Repository for the Item collection.
pub struct ItemRepository<'a, S: RecordStore> {
    store: &'a S,
    collection: &'a CollectionId,
    bills: &'a BillRepository<'a, S>,
}

impl<'a, S: RecordStore> ItemRepository<'a, S> {
    pub fn new(
        store: &'a S,
        collection: &'a CollectionId,
        bills: &'a BillRepository<'a, S>,
    ) -> Self {
        Self {
            store,
            collection,
            bills,
        }
    }

    /// Create one record per item, referencing the parent Bill.
    ///
    /// Fails with [`PipelineError::MissingBill`] — and creates nothing — if
    /// the parent cannot be resolved. Returns the number of items created.
    pub fn create_all(&self, items: &[LineItem], bill_no: &BillNo) -> Result<usize, PipelineError> {
        let parent = self.bills.find_by_number(bill_no)?.ok_or_else(|| {
            PipelineError::MissingBill {
                bill_no: bill_no.clone(),
                operation: "creating items".to_owned(),
            }
        })?;

        for (index, item) in items.iter().enumerate() {
            self.store
                .create(self.collection, item_fields(item, &parent.id))
                .map_err(|source| PipelineError::ItemCreate {
                    bill_no: bill_no.clone(),
                    index: index + 1,
                    item_type: item.item_type.clone(),
                    number: item.number.clone(),
                    source,
                })?;
            tracing::info!(
                "created item {}-{} ({}) for bill {bill_no}",
                item.item_type,
                item.number,
                item.amount
            );
        }
        Ok(items.len())
    }
}

fn item_fields(item: &LineItem, parent: &RecordId) -> FieldMap {
    FieldMap::from([
        (
            fields::PARENT_BILL.to_owned(),
            FieldValue::relation(parent.clone()),
        ),
        (
            fields::ITEM_TYPE.to_owned(),
            FieldValue::select(item.item_type.as_str()),
        ),
        (
            fields::ITEM_NUMBER.to_owned(),
            FieldValue::rich_text(item.number.as_str()),
        ),
        (fields::AMOUNT.to_owned(), FieldValue::number(item.amount)),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
