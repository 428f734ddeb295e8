use super::types::{BUILD_VERSION, ConfigMsg, VersionMsg};
use super::validate::valid_config;
use crate::error::{CtlrError, ValidationError};
use crate::queue::KeyedRecord;
use crate::trie::IdTrie;

/// Serializes the config message for `node_id` from its trie entry.
pub fn build_config_msg(trie: &IdTrie, node_id: &str) -> Result<String, CtlrError> {
    let entry = trie
        .get(node_id)
        .ok_or_else(|| ValidationError::UnknownId(node_id.to_string()))?;

    let msg = ConfigMsg {
        node_id: node_id.to_string(),
        networks: entry.peers.clone(),
    };

    Ok(serde_json::to_string(&msg)?)
}

/// Serializes a version message; `None` sends the controller's own build version.
pub fn build_version_msg(node_id: &str, version: Option<&str>) -> Result<String, CtlrError> {
    let msg = VersionMsg {
        node_id: node_id.to_string(),
        version: version.unwrap_or(BUILD_VERSION).to_string(),
    };

    Ok(serde_json::to_string(&msg)?)
}

/// Splits a version message into `(node_id, version)`.
///
/// Anything that does not decode as a version message (typically a bare node id from an
/// older peer) comes back as `(msg, None)`.
pub fn parse_version_msg(msg: &str) -> (String, Option<String>) {
    match serde_json::from_str::<VersionMsg>(msg) {
        Ok(decoded) => (decoded.node_id, Some(decoded.version)),
        Err(e) => {
            tracing::trace!("Not a version message ({}), treating as bare id", e);
            (msg.to_string(), None)
        }
    }
}

/// Validates a config message and wraps it as a queue record keyed by its node id.
pub fn config_record(msg: &str) -> Result<KeyedRecord, ValidationError> {
    let cfg = valid_config(msg)?;
    Ok(KeyedRecord::new(cfg.node_id, msg))
}
