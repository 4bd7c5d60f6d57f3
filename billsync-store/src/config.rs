//! Store configuration — constructed once at startup, passed by reference.
//!
//! Three settings are required from the environment: the access credential
//! and the two collection identifiers. Missing any is a hard startup failure,
//! and every missing name is reported in one error.

use std::time::Duration;

use thiserror::Error;

use crate::record::CollectionId;

/// Environment variable holding the bearer credential.
pub const ENV_TOKEN: &str = "NOTION_TOKEN";
/// Environment variable holding the Bill collection identifier.
pub const ENV_BILLS: &str = "NOTION_DB_BILLS";
/// Environment variable holding the Item collection identifier.
pub const ENV_ITEMS: &str = "NOTION_DB_ITEMS";

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// All errors that can arise from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", names.join(", "))]
    Missing { names: Vec<&'static str> },
}

/// Remote store settings for one process.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub token: String,
    pub bills_collection: CollectionId,
    pub items_collection: CollectionId,
    pub base_url: String,
    /// Per-call deadline covering connect, send and response.
    pub timeout: Duration,
}

impl StoreConfig {
    /// Build from the process environment. Collects every missing variable
    /// before failing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let token = require(ENV_TOKEN, &mut missing);
        let bills = require(ENV_BILLS, &mut missing);
        let items = require(ENV_ITEMS, &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::Missing { names: missing });
        }
        Ok(Self {
            token,
            bills_collection: CollectionId(bills),
            items_collection: CollectionId(items),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Explicit constructor for tests and embedding.
    pub fn new(
        token: impl Into<String>,
        bills_collection: CollectionId,
        items_collection: CollectionId,
    ) -> Self {
        Self {
            token: token.into(),
            bills_collection,
            items_collection,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn require(name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
