//! Error types for billsync-pipeline.
//!
//! Propagation policy: no stage recovers from a failure of an earlier stage;
//! every failure surfaces to the caller carrying the offending bill number
//! and operation, so a run can be diagnosed and safely re-run. Re-running is
//! not fully idempotent — see [`crate::items`] for the duplicate-item caveat.

use thiserror::Error;

use billsync_core::{BillNo, PayloadError};
use billsync_store::RemoteError;

/// All errors that can arise from a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The payload failed loading or contract validation. Always raised
    /// before any remote mutation.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// The remote store rejected or failed a request.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// An operation required a Bill record that could not be resolved.
    /// Fatal for item creation — the caller must have upserted the bill
    /// first. (The status-update path treats the same condition as a soft
    /// no-op instead; see [`crate::status`].)
    #[error("bill '{bill_no}' not found while {operation}")]
    MissingBill { bill_no: BillNo, operation: String },

    /// Creating one line item failed. Earlier items in the sequence are
    /// already committed server-side; later ones were never attempted.
    #[error(
        "failed to create item {index} ({item_type}-{number}) for bill '{bill_no}': {source}"
    )]
    ItemCreate {
        bill_no: BillNo,
        /// 1-based position in the payload's item sequence.
        index: usize,
        item_type: String,
        number: String,
        #[source]
        source: RemoteError,
    },
}
