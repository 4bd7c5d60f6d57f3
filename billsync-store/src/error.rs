//! Error types for billsync-store.

use thiserror::Error;

/// All errors that can arise from remote store operations.
///
/// Every variant names the failing operation so a top-level caller can report
/// which step of a run died without inspecting backtraces.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The store rejected the request with an HTTP status (authorization,
    /// unknown collection, malformed field, rate limit, ...).
    #[error("remote store returned {status} during {operation}: {body}")]
    Status {
        status: u16,
        operation: String,
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport failure during {operation}: {message}")]
    Transport { operation: String, message: String },

    /// The response body did not decode into the expected shape.
    #[error("failed to decode response during {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl RemoteError {
    /// Whether a retry could plausibly succeed: rate limiting, server-side
    /// failure, or a transport error. Client-side 4xx rejections are final.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Status { status, .. } => *status == 429 || *status >= 500,
            RemoteError::Transport { .. } => true,
            RemoteError::Decode { .. } => false,
        }
    }
}
