//! # billsync-store
//!
//! Generic client for the remote structured record store: query, create and
//! patch single records ("pages") in named collections ("databases").
//!
//! The [`RecordStore`] trait is the seam every repository is written against;
//! [`HttpRecordClient`] is the production implementation and [`MemoryStore`]
//! is the in-process double used by the pipeline test suites.

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod record;
pub mod retry;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use error::RemoteError;
pub use http::HttpRecordClient;
pub use memory::{MemoryStore, RollupLink};
pub use record::{
    CollectionId, DateValue, FieldMap, FieldValue, Filter, Record, RecordId, RelationRef,
    RollupValue, SelectValue, TextFragment,
};
pub use retry::RetryPolicy;
pub use store::RecordStore;
