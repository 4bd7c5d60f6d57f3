//! The `RecordStore` trait — the seam between repositories and the wire.

use crate::error::RemoteError;
use crate::record::{CollectionId, FieldMap, Filter, Record, RecordId};

/// Capability to query, create and patch single records in a named
/// collection of the remote store.
///
/// Calls are blocking; a pipeline run is one sequential flow of them. The
/// store offers no multi-record transactions, so every mutation stands alone
/// and callers must sequence their writes accordingly.
pub trait RecordStore {
    /// Query `collection` for at most the first record matching an equality
    /// filter on a designated field. `Ok(None)` when nothing matches.
    fn find(&self, collection: &CollectionId, filter: &Filter)
        -> Result<Option<Record>, RemoteError>;

    /// Insert a new record with the given field values; returns the created
    /// record including its assigned identity.
    fn create(&self, collection: &CollectionId, fields: FieldMap) -> Result<Record, RemoteError>;

    /// Update only the given fields of an existing record, leaving others
    /// untouched; returns the updated record.
    fn patch(&self, record_id: &RecordId, fields: FieldMap) -> Result<Record, RemoteError>;
}
