//! # billsync-core
//!
//! Domain types and payload handling for the billing sync pipeline.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs ([`BillNo`], [`BillStatus`])
//! - [`payload`] — payload document shape and loading
//! - [`schema`] — JSON-Schema pre-flight gate ([`SchemaValidator`])
//! - [`error`] — [`PayloadError`]

pub mod error;
pub mod payload;
pub mod schema;
pub mod types;

pub use error::PayloadError;
pub use payload::{BillHeader, LineItem, Payload};
pub use schema::SchemaValidator;
pub use types::{BillNo, BillStatus};
