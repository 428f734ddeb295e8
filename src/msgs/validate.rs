//! Message Validators
//!
//! Gatekeepers for everything that arrives from the transport. A message that fails here
//! is discarded before it reaches any queue.

use super::types::{ConfigMsg, NETWORK_ID_LEN, NODE_ID_LEN, Version};
use crate::error::ValidationError;

use serde_json::Value;

const KEY_NODE_ID: &str = "node_id";
const KEY_NETWORKS: &str = "networks";

fn valid_hex_id(what: &'static str, id: &str, expected: usize) -> Result<(), ValidationError> {
    if id.len() != expected {
        return Err(ValidationError::BadLength {
            what,
            expected,
            found: id.len(),
        });
    }

    if !id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(ValidationError::NotHex {
            what,
            value: id.to_string(),
        });
    }

    Ok(())
}

pub fn valid_node_id(id: &str) -> Result<(), ValidationError> {
    valid_hex_id("node id", id, NODE_ID_LEN)
}

pub fn valid_network_id(id: &str) -> Result<(), ValidationError> {
    valid_hex_id("network id", id, NETWORK_ID_LEN)
}

/// An announce message is a bare node id.
pub fn valid_announce(msg: &str) -> Result<(), ValidationError> {
    valid_node_id(msg)
}

/// Decodes a config message, requiring exactly `node_id` and a non-empty `networks` list.
pub fn valid_config(msg: &str) -> Result<ConfigMsg, ValidationError> {
    let value: Value =
        serde_json::from_str(msg).map_err(|e| ValidationError::NotJson(e.to_string()))?;

    let object = value.as_object().ok_or(ValidationError::NotObject)?;

    if let Some(extra) = object
        .keys()
        .find(|key| key.as_str() != KEY_NODE_ID && key.as_str() != KEY_NETWORKS)
    {
        return Err(ValidationError::UnexpectedKey(extra.clone()));
    }

    let node_id = object
        .get(KEY_NODE_ID)
        .ok_or(ValidationError::MissingKey(KEY_NODE_ID))?
        .as_str()
        .ok_or(ValidationError::WrongType(KEY_NODE_ID))?;
    valid_node_id(node_id)?;

    let networks = object
        .get(KEY_NETWORKS)
        .ok_or(ValidationError::MissingKey(KEY_NETWORKS))?
        .as_array()
        .ok_or(ValidationError::WrongType(KEY_NETWORKS))?;

    if networks.is_empty() {
        return Err(ValidationError::EmptyNetworks);
    }

    let networks = networks
        .iter()
        .map(|net| {
            let net = net.as_str().ok_or(ValidationError::WrongType(KEY_NETWORKS))?;
            valid_network_id(net)?;
            Ok(net.to_string())
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(ConfigMsg {
        node_id: node_id.to_string(),
        networks,
    })
}

/// True iff `candidate` parses as `major.minor.patch` and is not older than `base`.
///
/// A malformed `base` also yields `false`: there is nothing to compare against.
pub fn valid_version(base: &str, candidate: Option<&str>) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };

    match (base.parse::<Version>(), candidate.parse::<Version>()) {
        (Ok(base), Ok(candidate)) => candidate >= base,
        _ => false,
    }
}
