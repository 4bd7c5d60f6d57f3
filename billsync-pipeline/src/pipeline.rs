//! The sync orchestrator — one ordered run of typed stages.
//!
//! ```text
//! validate ─▶ upsert bill ─▶ create items ─▶ read rollups ─▶ maybe confirm ─▶ summary
//! ```
//!
//! The schema gate runs before any remote call (validate-before-mutate).
//! Failure at any later stage propagates immediately and aborts the rest;
//! there is no compensation — remote writes made before the failure persist,
//! and the error names the stage and bill so the operator can decide about a
//! re-run (which appends duplicate items, see [`crate::items`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use billsync_core::{BillNo, BillStatus, Payload, SchemaValidator};
use billsync_store::{CollectionId, RecordStore};

use crate::bills::BillRepository;
use crate::error::PipelineError;
use crate::items::ItemRepository;
use crate::rollups::{Rollup, RollupReader};
use crate::status::StatusTransitioner;

/// Result of a completed run — echoed to the operator and returned to
/// embedding callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub bill_no: BillNo,
    pub items_processed: usize,
    pub final_status: BillStatus,
    /// The aggregate snapshot the confirmation decision was based on. May
    /// lag the items just created; reported rather than hidden.
    pub rollups: Rollup,
}

/// Run the full pipeline for one payload document.
///
/// `payload` is the raw document; it passes the schema gate and the typed
/// decode before the first remote call.
pub fn run<S: RecordStore>(
    store: &S,
    bills_collection: &CollectionId,
    items_collection: &CollectionId,
    validator: &SchemaValidator,
    payload: &Value,
) -> Result<SyncSummary, PipelineError> {
    // Stage 1: contract gate. Nothing is mutated before this passes.
    validator.validate(payload)?;
    let payload = Payload::from_value(payload)?;
    let bill_no = payload.bill.bill_no.clone();
    tracing::info!("payload for bill {bill_no} validated");

    let bills = BillRepository::new(store, bills_collection);

    // Stage 2: header upsert — the idempotency boundary.
    bills.upsert(&payload.bill)?;

    // Stage 3: dependent items, referencing the just-upserted bill.
    let items = ItemRepository::new(store, items_collection, &bills);
    let items_processed = items.create_all(&payload.items, &bill_no)?;

    // Stage 4: aggregate read-back (possibly stale, see crate::rollups).
    let rollups = RollupReader::new(&bills).read(&bill_no)?;
    tracing::info!(
        "rollups for bill {bill_no}: {} items, total {}",
        rollups.items_count,
        rollups.total_amount
    );

    // Stage 5: conditional confirmation, gated on the payload-declared status.
    let final_status =
        StatusTransitioner::new(&bills).apply(&bill_no, &rollups, &payload.bill.status)?;

    let summary = SyncSummary {
        bill_no,
        items_processed,
        final_status,
        rollups,
    };
    tracing::info!(
        "sync complete for bill {}: {} items, final status {}",
        summary.bill_no,
        summary.items_processed,
        summary.final_status
    );
    Ok(summary)
}
