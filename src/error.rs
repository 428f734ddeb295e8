//! Error Types
//!
//! `ValidationError` is raised by the message validators and by the precondition checks of
//! the trie and the registration state machine. It carries one variant per failed field so
//! callers can tell a bad length from a bad hex digit or a missing key.
//!
//! `CtlrError` is the service-level error: it wraps validation failures together with the
//! encode, snapshot and publish failures of the collaborators around the core.

use thiserror::Error;

/// A message, identifier or precondition failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier has the wrong number of characters.
    #[error("bad length for {what}: expected {expected}, found {found}")]
    BadLength {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Identifier contains a character outside `[0-9a-f]`.
    #[error("non-hex character in {what}: {value:?}")]
    NotHex { what: &'static str, value: String },

    #[error("message is not valid JSON: {0}")]
    NotJson(String),

    #[error("message is not a JSON object")]
    NotObject,

    #[error("missing key: {0}")]
    MissingKey(&'static str),

    #[error("unexpected key: {0}")]
    UnexpectedKey(String),

    #[error("wrong type for key: {0}")]
    WrongType(&'static str),

    #[error("network list is empty")]
    EmptyNetworks,

    /// The list that supplies a trie key was empty.
    #[error("key list is empty")]
    EmptyKeyList,

    #[error("no trie entry for {0}")]
    UnknownId(String),

    /// Registration attempted for an id that was never announced.
    #[error("node {0} was never announced")]
    NotAnnounced(String),

    #[error("malformed version string: {0:?}")]
    BadVersion(String),
}

/// Errors raised by the controller service and its collaborators.
#[derive(Debug, Error)]
pub enum CtlrError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("publish on {topic} failed: {reason}")]
    Publish { topic: String, reason: String },
}

impl CtlrError {
    /// True when the error is a rejected message rather than an infrastructure failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CtlrError::Validation(_))
    }
}
