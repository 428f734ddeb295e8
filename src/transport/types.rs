use crate::error::CtlrError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named pub/sub topics the controller publishes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Announced node ids handed on for classification.
    HandleNode,
    /// Built config messages for nodes.
    CfgMsgs,
    /// Nodes that went away.
    Offline,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::HandleNode => "handle_node",
            Topic::CfgMsgs => "cfg_msgs",
            Topic::Offline => "offline",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message as it leaves the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Published {
    pub topic: Topic,
    pub msg: String,
}

/// The publish side of the pub/sub transport.
///
/// The core only ever hands over fully built message strings; sockets, framing and
/// delivery belong to the implementation.
pub trait Publisher: Send + Sync {
    fn publish(&self, topic: Topic, msg: &str) -> Result<(), CtlrError>;
}
