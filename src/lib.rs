//! Peer-Mesh Node Controller Library
//!
//! The membership and registration core of a node controller. Nodes announce themselves,
//! wait for a config message, and get registered; the controller tracks which nodes belong
//! to which networks. The binary (`main.rs`) wires these modules to an HTTP ingress and an
//! in-process publisher.
//!
//! ## Modules
//! - **`queue`**: FIFO work queues, keyed records and bincode snapshots.
//! - **`msgs`**: wire message validation and the config/version codec.
//! - **`trie`**: the node/network membership store and dangling-link detection.
//! - **`registration`**: announce classification, expiry and explicit registration.
//! - **`cfg_wait`**: matching waiting nodes with their config message, with a miss fallback.
//! - **`transport`**: the publish seam and queue draining.
//! - **`controller`**: state ownership, the reconcile tick and the HTTP handlers.
//! - **`config`** / **`error`**: command-line options and error types.

pub mod cfg_wait;
pub mod config;
pub mod controller;
pub mod error;
pub mod msgs;
pub mod queue;
pub mod registration;
pub mod transport;
pub mod trie;
