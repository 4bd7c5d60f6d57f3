//! In-memory [`RecordStore`] double for tests.
//!
//! Behaves like the remote store as the client sees it: opaque identities
//! assigned on create, equality lookup on title text, partial patch. Two
//! simulation knobs cover the behaviors the pipeline must survive:
//!
//! - **Rollups** — with a [`RollupLink`] configured, parent records returned
//!   by `find` carry server-computed count/sum fields aggregated over child
//!   records; flipping `set_stale_rollups(true)` suppresses them, imitating
//!   an aggregate that has not caught up yet (eventual consistency).
//! - **Failure injection** — `fail_nth_create_in` makes the Nth create in a
//!   collection return a 500, for partial-failure scenarios.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::RemoteError;
use crate::record::{
    CollectionId, FieldMap, FieldValue, Filter, Record, RecordId, RollupValue,
};
use crate::store::RecordStore;

/// Parent/child aggregation wiring for simulated rollups.
#[derive(Debug, Clone)]
pub struct RollupLink {
    pub parent_collection: CollectionId,
    pub child_collection: CollectionId,
    /// Relation field on the child pointing at the parent.
    pub relation_field: String,
    /// Numeric field on the child that the sum aggregates.
    pub amount_field: String,
    /// Rollup field name on the parent holding the child count.
    pub count_field: String,
    /// Rollup field name on the parent holding the amount sum.
    pub sum_field: String,
}

#[derive(Debug)]
struct FailCreate {
    collection: CollectionId,
    nth: usize,
    seen: usize,
}

#[derive(Debug, Default)]
struct Inner {
    collections: BTreeMap<String, Vec<Record>>,
    rollups: Option<RollupLink>,
    stale_rollups: bool,
    fail_create: Option<FailCreate>,
    next_id: u64,
}

/// In-process record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rollups(self, link: RollupLink) -> Self {
        self.lock().rollups = Some(link);
        self
    }

    /// Freeze (`true`) or resume (`false`) rollup computation on reads.
    pub fn set_stale_rollups(&self, stale: bool) {
        self.lock().stale_rollups = stale;
    }

    /// Make the `nth` create (1-based) in `collection` fail with a 500.
    pub fn fail_nth_create_in(&self, collection: &CollectionId, nth: usize) {
        self.lock().fail_create = Some(FailCreate {
            collection: collection.clone(),
            nth,
            seen: 0,
        });
    }

    /// Snapshot of every record in a collection, in creation order.
    pub fn records_in(&self, collection: &CollectionId) -> Vec<Record> {
        self.lock()
            .collections
            .get(&collection.0)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count_in(&self, collection: &CollectionId) -> usize {
        self.records_in(collection).len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Inner {
    fn decorate_rollups(&self, collection: &CollectionId, record: &mut Record) {
        if self.stale_rollups {
            return;
        }
        let Some(link) = &self.rollups else { return };
        if &link.parent_collection != collection {
            return;
        }

        let children = self
            .collections
            .get(&link.child_collection.0)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let related: Vec<&Record> = children
            .iter()
            .filter(|child| {
                matches!(
                    child.properties.get(&link.relation_field),
                    Some(FieldValue::Relation { relation })
                        if relation.iter().any(|r| r.id == record.id)
                )
            })
            .collect();

        let count = related.len() as f64;
        let sum: f64 = related
            .iter()
            .filter_map(|child| match child.properties.get(&link.amount_field) {
                Some(FieldValue::Number { number }) => *number,
                _ => None,
            })
            .sum();

        record.properties.insert(
            link.count_field.clone(),
            FieldValue::Rollup {
                rollup: RollupValue::Number {
                    number: Some(count),
                },
            },
        );
        record.properties.insert(
            link.sum_field.clone(),
            FieldValue::Rollup {
                rollup: RollupValue::Number { number: Some(sum) },
            },
        );
    }
}

impl RecordStore for MemoryStore {
    fn find(
        &self,
        collection: &CollectionId,
        filter: &Filter,
    ) -> Result<Option<Record>, RemoteError> {
        let inner = self.lock();
        let records = inner
            .collections
            .get(&collection.0)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let found = records.iter().find(|record| {
            record
                .properties
                .get(&filter.property)
                .and_then(FieldValue::plain_text)
                .is_some_and(|text| text == filter.equals)
        });
        Ok(found.cloned().map(|mut record| {
            inner.decorate_rollups(collection, &mut record);
            record
        }))
    }

    fn create(&self, collection: &CollectionId, fields: FieldMap) -> Result<Record, RemoteError> {
        let mut inner = self.lock();

        if let Some(fail) = inner.fail_create.as_mut() {
            if fail.collection == *collection {
                fail.seen += 1;
                if fail.seen == fail.nth {
                    return Err(RemoteError::Status {
                        status: 500,
                        operation: "create".to_owned(),
                        body: "injected create failure".to_owned(),
                    });
                }
            }
        }

        inner.next_id += 1;
        let record = Record {
            id: RecordId(format!("rec-{}", inner.next_id)),
            properties: fields,
        };
        inner
            .collections
            .entry(collection.0.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn patch(&self, record_id: &RecordId, fields: FieldMap) -> Result<Record, RemoteError> {
        let mut inner = self.lock();
        for records in inner.collections.values_mut() {
            if let Some(record) = records.iter_mut().find(|r| &r.id == record_id) {
                record.properties.extend(fields);
                return Ok(record.clone());
            }
        }
        Err(RemoteError::Status {
            status: 404,
            operation: "patch".to_owned(),
            body: format!("record {record_id} not found"),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
