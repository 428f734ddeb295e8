//! Config-Wait Module
//!
//! Bounded-retry matching of waiting nodes to their pending config messages, with a
//! fallback to direct registration when no config ever arrives.

pub mod protocol;

pub use protocol::{MISS_THRESHOLD, await_config, process_hold_queue, release_node};
