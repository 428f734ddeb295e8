//! Transport Module
//!
//! The outbound edge of the controller. Built messages are handed to a `Publisher` under
//! a named topic; `ChannelPublisher` is the in-process implementation used by the binary
//! and the tests.

pub mod channel;
pub mod publish;
pub mod types;

pub use channel::ChannelPublisher;
pub use publish::{drain_msg_queue, publish_cfg_msg};
pub use types::{Published, Publisher, Topic};

#[cfg(test)]
mod tests;
