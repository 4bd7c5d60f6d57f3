//! End-to-end pipeline scenarios against the in-memory store.

use serde_json::{json, Value};

use billsync_core::{BillStatus, SchemaValidator};
use billsync_pipeline::{pipeline, PipelineError, Rollup};
use billsync_store::{CollectionId, MemoryStore, RollupLink};

fn bills() -> CollectionId {
    CollectionId::from("bills-db")
}

fn items() -> CollectionId {
    CollectionId::from("items-db")
}

fn store_with_rollups() -> MemoryStore {
    MemoryStore::new().with_rollups(RollupLink {
        parent_collection: bills(),
        child_collection: items(),
        relation_field: "Parent Bill".to_owned(),
        amount_field: "Amount".to_owned(),
        count_field: "Items Count".to_owned(),
        sum_field: "Total Amount".to_owned(),
    })
}

fn validator() -> SchemaValidator {
    let schema = json!({
        "type": "object",
        "required": ["bill", "items"],
        "properties": {
            "bill": {
                "type": "object",
                "required": ["bill_no", "bill_date", "customer", "status"],
                "properties": {
                    "bill_no": { "type": "string" },
                    "bill_date": { "type": "string" },
                    "customer": { "type": "string" },
                    "status": { "type": "string" }
                }
            },
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["type", "number", "amount"],
                    "properties": {
                        "type": { "type": "string" },
                        "number": { "type": "string" },
                        "amount": { "type": "number" }
                    }
                }
            }
        }
    });
    SchemaValidator::from_value(&schema).expect("schema compiles")
}

fn sample_payload() -> Value {
    json!({
        "bill": {
            "bill_no": "B-001",
            "bill_date": "2024-01-01",
            "customer": "Acme",
            "status": "Draft"
        },
        "items": [
            { "type": "A", "number": "1", "amount": 50.0 },
            { "type": "B", "number": "2", "amount": 25.0 }
        ]
    })
}

fn run(store: &MemoryStore, payload: &Value) -> Result<billsync_pipeline::SyncSummary, PipelineError> {
    pipeline::run(store, &bills(), &items(), &validator(), payload)
}

#[test]
fn end_to_end_draft_bill_is_confirmed() {
    let store = store_with_rollups();

    let summary = run(&store, &sample_payload()).expect("pipeline succeeds");

    assert_eq!(summary.bill_no.as_str(), "B-001");
    assert_eq!(summary.items_processed, 2);
    assert_eq!(summary.final_status, BillStatus::Confirmed);
    assert_eq!(
        summary.rollups,
        Rollup {
            items_count: 2,
            total_amount: 75.0
        }
    );

    assert_eq!(store.count_in(&bills()), 1);
    assert_eq!(store.count_in(&items()), 2);
}

#[test]
fn summary_serializes_to_operator_shape() {
    let store = store_with_rollups();
    let summary = run(&store, &sample_payload()).unwrap();
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(
        value,
        json!({
            "bill_no": "B-001",
            "items_processed": 2,
            "final_status": "Confirmed",
            "rollups": { "items_count": 2, "total_amount": 75.0 }
        })
    );
}

#[test]
fn rerun_converges_on_one_header_but_appends_items() {
    let store = store_with_rollups();

    run(&store, &sample_payload()).unwrap();
    run(&store, &sample_payload()).unwrap();

    assert_eq!(store.count_in(&bills()), 1, "upsert is idempotent");
    assert_eq!(
        store.count_in(&items()),
        4,
        "items are appended on every run, by design"
    );
}

#[test]
fn invalid_payload_aborts_before_any_mutation() {
    let store = store_with_rollups();
    let payload = json!({
        "bill": { "bill_no": "B-001" },
        "items": []
    });

    let err = run(&store, &payload).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Payload(billsync_core::PayloadError::SchemaViolation { .. })
    ));
    assert_eq!(store.count_in(&bills()), 0, "no remote write before the gate");
    assert_eq!(store.count_in(&items()), 0);
}

#[test]
fn partial_item_failure_aborts_without_a_summary() {
    let store = store_with_rollups();
    store.fail_nth_create_in(&items(), 2);

    let payload = json!({
        "bill": {
            "bill_no": "B-001",
            "bill_date": "2024-01-01",
            "customer": "Acme",
            "status": "Draft"
        },
        "items": [
            { "type": "A", "number": "1", "amount": 10.0 },
            { "type": "B", "number": "2", "amount": 20.0 },
            { "type": "C", "number": "3", "amount": 30.0 }
        ]
    });

    let err = run(&store, &payload).unwrap_err();
    match &err {
        PipelineError::ItemCreate {
            bill_no,
            index,
            number,
            ..
        } => {
            assert_eq!(bill_no.as_str(), "B-001");
            assert_eq!(*index, 2);
            assert_eq!(number, "2");
        }
        other => panic!("expected ItemCreate, got {other}"),
    }

    // The header upsert and the first item committed; nothing else ran.
    assert_eq!(store.count_in(&bills()), 1);
    assert_eq!(store.count_in(&items()), 1);
    let bill = store.records_in(&bills()).remove(0);
    assert_eq!(bill.properties["Status"].select_name(), Some("Draft"));
}

#[test]
fn stale_aggregate_leaves_the_bill_in_draft() {
    let store = store_with_rollups();
    store.set_stale_rollups(true);

    let summary = run(&store, &sample_payload()).unwrap();

    assert_eq!(summary.final_status, BillStatus::Draft);
    assert_eq!(summary.rollups, Rollup::default());
    let bill = store.records_in(&bills()).remove(0);
    assert_eq!(bill.properties["Status"].select_name(), Some("Draft"));
}

#[test]
fn confirmed_payload_is_not_retriggered() {
    let store = store_with_rollups();
    let payload = json!({
        "bill": {
            "bill_no": "B-007",
            "bill_date": "2024-02-01",
            "customer": "Globex",
            "status": "Confirmed"
        },
        "items": [
            { "type": "A", "number": "1", "amount": 100.0 }
        ]
    });

    let summary = run(&store, &payload).unwrap();
    assert_eq!(summary.final_status, BillStatus::Confirmed);
    assert_eq!(summary.rollups.items_count, 1);
}

#[test]
fn foreign_status_passes_through_unchanged() {
    let store = store_with_rollups();
    let payload = json!({
        "bill": {
            "bill_no": "B-009",
            "bill_date": "2024-03-01",
            "customer": "Initech",
            "status": "Cancelled"
        },
        "items": [
            { "type": "A", "number": "1", "amount": 10.0 }
        ]
    });

    let summary = run(&store, &payload).unwrap();
    assert_eq!(
        summary.final_status,
        BillStatus::Other("Cancelled".to_owned())
    );
    let bill = store.records_in(&bills()).remove(0);
    assert_eq!(bill.properties["Status"].select_name(), Some("Cancelled"));
}
