//! Blocking HTTP implementation of [`RecordStore`].
//!
//! Three endpoints, matching the consumed protocol:
//!
//! ```text
//! POST  {base}/databases/{collection}/query    find (filtered query)
//! POST  {base}/pages                           create under a collection
//! PATCH {base}/pages/{record_id}               partial field update
//! ```
//!
//! Authentication is a bearer credential; the protocol-version header is
//! pinned. Idempotent calls (`find`, `patch`) run under the retry policy;
//! `create` is sent exactly once — see [`crate::retry`].

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::error::RemoteError;
use crate::record::{CollectionId, FieldMap, Filter, Record, RecordId};
use crate::retry::{with_retry, RetryPolicy};
use crate::store::RecordStore;

/// Protocol-version header value, pinned to the revision the field shapes
/// in [`crate::record`] were written against.
pub const PROTOCOL_VERSION: &str = "2022-06-28";

/// Production record-store client.
pub struct HttpRecordClient {
    agent: ureq::Agent,
    token: String,
    base_url: String,
    retry: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Record>,
}

impl HttpRecordClient {
    pub fn new(config: &StoreConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self {
            agent,
            token: config.token.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn request(
        &self,
        method: &str,
        operation: &str,
        url: &str,
        body: &Value,
    ) -> Result<Value, RemoteError> {
        let response = self
            .agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", PROTOCOL_VERSION)
            .send_json(body)
            .map_err(|e| map_ureq(operation, e))?;
        response.into_json().map_err(|source| RemoteError::Decode {
            operation: operation.to_owned(),
            source,
        })
    }
}

impl RecordStore for HttpRecordClient {
    fn find(
        &self,
        collection: &CollectionId,
        filter: &Filter,
    ) -> Result<Option<Record>, RemoteError> {
        let url = format!("{}/databases/{}/query", self.base_url, collection);
        let body = json!({
            "filter": {
                "property": filter.property,
                "title": { "equals": filter.equals }
            }
        });
        let value = with_retry(self.retry, "find", || {
            self.request("POST", "find", &url, &body)
        })?;
        let response: QueryResponse = decode("find", value)?;
        Ok(response.results.into_iter().next())
    }

    fn create(&self, collection: &CollectionId, fields: FieldMap) -> Result<Record, RemoteError> {
        let url = format!("{}/pages", self.base_url);
        let body = json!({
            "parent": { "database_id": collection },
            "properties": fields
        });
        // Never retried: the store assigns identity on insert and a retry
        // would duplicate the record.
        let value = self.request("POST", "create", &url, &body)?;
        decode("create", value)
    }

    fn patch(&self, record_id: &RecordId, fields: FieldMap) -> Result<Record, RemoteError> {
        let url = format!("{}/pages/{}", self.base_url, record_id);
        let body = json!({ "properties": fields });
        let value = with_retry(self.retry, "patch", || {
            self.request("PATCH", "patch", &url, &body)
        })?;
        decode("patch", value)
    }
}

fn decode<T: serde::de::DeserializeOwned>(operation: &str, value: Value) -> Result<T, RemoteError> {
    serde_json::from_value(value).map_err(|e| RemoteError::Decode {
        operation: operation.to_owned(),
        source: std::io::Error::other(e),
    })
}

fn map_ureq(operation: &str, err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            RemoteError::Status {
                status,
                operation: operation.to_owned(),
                body,
            }
        }
        ureq::Error::Transport(transport) => RemoteError::Transport {
            operation: operation.to_owned(),
            message: transport.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
