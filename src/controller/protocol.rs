//! HTTP Ingress Definitions
//!
//! Endpoint paths and the JSON bodies the controller answers with. Request bodies are the
//! raw wire messages (announce id, config JSON, version JSON) sent as plain text.

use serde::{Deserialize, Serialize};

pub const ENDPOINT_ANNOUNCE: &str = "/announce";
pub const ENDPOINT_REGISTER: &str = "/register";
pub const ENDPOINT_CFG: &str = "/cfg";
pub const ENDPOINT_VERSION: &str = "/version";
pub const ENDPOINT_OFFLINE: &str = "/offline";
pub const ENDPOINT_STATUS: &str = "/status";
pub const ENDPOINT_DANGLING: &str = "/dangling";

#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub error: Option<String>,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    /// The version message to hand back to the node.
    pub reply: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub announced: usize,
    pub registered: usize,
    pub waiting: usize,
    pub pending_configs: usize,
    pub held: usize,
    pub trie_entries: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DanglingLink {
    pub key: String,
    pub peer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DanglingResponse {
    pub links: Vec<DanglingLink>,
}

/// Outcome of one reconcile tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub reconciled: usize,
    pub expired: usize,
    /// Nodes whose hold-queue entries were cleared because they stopped waiting.
    pub released: usize,
    pub matched: Vec<String>,
    pub fallback_registered: Vec<String>,
    pub still_waiting: usize,
    pub dangling: usize,
}
