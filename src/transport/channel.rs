use super::types::{Published, Publisher, Topic};
use crate::error::CtlrError;

use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 1024;

/// In-process publisher backed by a tokio broadcast channel.
///
/// Every subscriber sees every message, in publish order. Publishing with nobody
/// subscribed drops the message and is not an error.
pub struct ChannelPublisher {
    sender: broadcast::Sender<Published>,
}

impl ChannelPublisher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Published> {
        self.sender.subscribe()
    }
}

impl Default for ChannelPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&self, topic: Topic, msg: &str) -> Result<(), CtlrError> {
        let published = Published {
            topic,
            msg: msg.to_string(),
        };

        match self.sender.send(published) {
            Ok(receivers) => {
                tracing::debug!("Published on {} to {} subscriber(s)", topic, receivers);
            }
            Err(_) => {
                tracing::debug!("No subscribers on {}, message dropped", topic);
            }
        }

        Ok(())
    }
}
