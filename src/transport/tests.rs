//! Transport Module Tests
//!
//! ## Test Scopes
//! - **Channel Publisher**: ordering and topic tagging seen by a subscriber.
//! - **Drain**: node ids leave the source queue in order and are recorded in `pub_q`.
//! - **Config Publish**: config messages are built from the trie.

#[cfg(test)]
mod tests {
    use crate::error::CtlrError;
    use crate::msgs::valid_config;
    use crate::queue::WorkQueue;
    use crate::transport::{
        ChannelPublisher, Published, Publisher, Topic, drain_msg_queue, publish_cfg_msg,
    };
    use crate::trie::{IdTrie, KeySide, Needs};
    use std::sync::Mutex;

    const NODE1: &str = "deadbeef01";
    const NODE2: &str = "20beefdead";

    /// Accepts a fixed number of messages, then fails.
    struct FlakyPublisher {
        budget: Mutex<usize>,
        sent: Mutex<Vec<Published>>,
    }

    impl FlakyPublisher {
        fn new(budget: usize) -> Self {
            Self {
                budget: Mutex::new(budget),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl Publisher for FlakyPublisher {
        fn publish(&self, topic: Topic, msg: &str) -> Result<(), CtlrError> {
            let mut budget = self.budget.lock().unwrap();
            if *budget == 0 {
                return Err(CtlrError::Publish {
                    topic: topic.to_string(),
                    reason: "link down".to_string(),
                });
            }
            *budget -= 1;
            self.sent.lock().unwrap().push(Published {
                topic,
                msg: msg.to_string(),
            });
            Ok(())
        }
    }

    fn q(items: &[&str]) -> WorkQueue<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ============================================================
    // CHANNEL PUBLISHER TESTS
    // ============================================================

    #[test]
    fn test_topic_names() {
        assert_eq!(Topic::HandleNode.as_str(), "handle_node");
        assert_eq!(Topic::CfgMsgs.to_string(), "cfg_msgs");
        assert_eq!(Topic::Offline.as_str(), "offline");
    }

    #[test]
    fn test_channel_publisher_without_subscribers() {
        let publisher = ChannelPublisher::new();

        assert!(publisher.publish(Topic::HandleNode, NODE1).is_ok());
    }

    #[tokio::test]
    async fn test_node_pub() {
        let publisher = ChannelPublisher::new();
        let mut rx = publisher.subscribe();
        let mut node_q = q(&[NODE1, NODE2]);
        let mut pub_q = WorkQueue::new();

        let sent = drain_msg_queue(&mut node_q, Some(&mut pub_q), &publisher, Topic::HandleNode)
            .unwrap();

        assert_eq!(sent, 2);
        assert!(node_q.is_empty());
        assert_eq!(pub_q.to_vec(), vec![NODE1.to_string(), NODE2.to_string()]);

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.topic, Topic::HandleNode);
        assert_eq!(first.msg, NODE1);
        assert_eq!(second.msg, NODE2);
    }

    #[tokio::test]
    async fn test_node_pub_offline_without_pub_q() {
        let publisher = ChannelPublisher::new();
        let mut rx = publisher.subscribe();
        let mut node_q = q(&[NODE1, NODE2, NODE1]);

        drain_msg_queue(&mut node_q, None, &publisher, Topic::Offline).unwrap();

        assert!(node_q.is_empty());
        let mut seen = Vec::new();
        for _ in 0..3 {
            let msg = rx.recv().await.unwrap();
            assert_eq!(msg.topic, Topic::Offline);
            seen.push(msg.msg);
        }
        assert_eq!(seen, vec![NODE1, NODE2, NODE1]);
    }

    #[test]
    fn test_drain_stops_at_failure() {
        let publisher = FlakyPublisher::new(1);
        let mut node_q = q(&[NODE1, NODE2]);
        let mut pub_q = WorkQueue::new();

        let res = drain_msg_queue(&mut node_q, Some(&mut pub_q), &publisher, Topic::HandleNode);

        assert!(matches!(res, Err(CtlrError::Publish { .. })));
        assert_eq!(node_q.to_vec(), vec![NODE2.to_string()]);
        assert_eq!(pub_q.to_vec(), vec![NODE1.to_string()]);
        assert_eq!(publisher.sent.lock().unwrap().len(), 1);
    }

    // ============================================================
    // CONFIG PUBLISH TESTS
    // ============================================================

    #[tokio::test]
    async fn test_node_cfg() {
        let publisher = ChannelPublisher::new();
        let mut rx = publisher.subscribe();
        let mut trie = IdTrie::new();
        trie.update(
            &["7ac4235ec5d3d940"],
            &[NODE1],
            Some(Needs::new(false, true)),
            KeySide::Node,
        )
        .unwrap();

        let msg = publish_cfg_msg(&trie, NODE1, &publisher).unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.topic, Topic::CfgMsgs);
        assert_eq!(received.msg, msg);
        let cfg = valid_config(&received.msg).unwrap();
        assert_eq!(cfg.node_id, NODE1);
        assert_eq!(cfg.networks, vec!["7ac4235ec5d3d940".to_string()]);
    }

    #[test]
    fn test_publish_cfg_unknown_node() {
        let publisher = FlakyPublisher::new(10);
        let trie = IdTrie::new();

        let res = publish_cfg_msg(&trie, NODE2, &publisher);

        assert!(res.unwrap_err().is_validation());
        assert!(publisher.sent.lock().unwrap().is_empty());
    }
}
