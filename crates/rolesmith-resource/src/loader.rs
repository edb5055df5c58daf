//! Resource loader abstraction: addresses, outcomes, and the loader trait.

use rolesmith_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Parsed `@[!]protocol://resource` address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceAddress {
    pub protocol: String,
    pub resource: String,
    pub eager: bool,
}

impl ResourceAddress {
    pub fn new(protocol: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            resource: resource.into(),
            eager: false,
        }
    }

    pub fn role(id: &str) -> Self {
        Self::new("role", id)
    }

    pub fn parse(address: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress(address.to_string());
        let body = address.trim().strip_prefix('@').ok_or_else(invalid)?;
        let (eager, body) = match body.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (protocol, resource) = body.split_once("://").ok_or_else(invalid)?;
        if protocol.is_empty()
            || resource.is_empty()
            || protocol.contains(|c: char| c.is_whitespace() || c == ':' || c == '@')
            || resource.contains(char::is_whitespace)
        {
            return Err(invalid());
        }
        Ok(Self {
            protocol: protocol.to_string(),
            resource: resource.to_string(),
            eager,
        })
    }
}

impl std::fmt::Display for ResourceAddress {
    /// Canonical form; the eager marker is not part of identity.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}://{}", self.protocol, self.resource)
    }
}

/// Result of a single load. `success: false` is a normal answer, not a fault.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn found(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Content of a successful, non-empty load.
    pub fn into_content(self) -> Option<String> {
        if !self.success {
            return None;
        }
        self.content.filter(|c| !c.trim().is_empty())
    }
}

/// Shared resource-loading capability.
///
/// `initialize` must be idempotent: concurrent and repeated calls perform the
/// underlying setup at most once.
#[async_trait::async_trait]
pub trait ResourceLoader: Send + Sync {
    /// One-time setup (registry scan, connection, ...).
    async fn initialize(&self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    /// Load the resource at `address` (`@protocol://resource`).
    async fn load_resource(&self, address: &str) -> Result<LoadOutcome>;
}
