//! # billsync-pipeline
//!
//! Bill synchronization and reconciliation against the remote record store.
//!
//! Call [`pipeline::run`] to drive a full run: validate the payload, upsert
//! the bill header, create line items under the parent reference, read the
//! server-computed rollups back, and auto-confirm the bill when the rollup
//! justifies it. Each stage is its own component and can be used on its own:
//!
//! - [`bills::BillRepository`] — natural-key lookup and upsert
//! - [`items::ItemRepository`] — dependent item creation
//! - [`rollups::RollupReader`] — aggregate read-back with zero defaulting
//! - [`status::StatusTransitioner`] — the Draft → Confirmed rule

pub mod bills;
pub mod error;
pub mod fields;
pub mod items;
pub mod pipeline;
pub mod rollups;
pub mod status;

pub use bills::{BillRepository, UpsertOutcome};
pub use error::PipelineError;
pub use items::ItemRepository;
pub use pipeline::{run, SyncSummary};
pub use rollups::{Rollup, RollupReader};
pub use status::StatusTransitioner;
