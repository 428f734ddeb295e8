use super::types::{Publisher, Topic};
use crate::error::CtlrError;
use crate::msgs::build_config_msg;
use crate::queue::WorkQueue;
use crate::trie::IdTrie;

/// Publishes every id in `src` on `topic`, head first, emptying `src`.
///
/// When `pub_q` is given each published id is also appended to it, keeping a record of
/// what went out. Stops at the first publish failure; the failed id stays at the head of
/// `src`. Returns the number of ids published.
pub fn drain_msg_queue(
    src: &mut WorkQueue<String>,
    mut pub_q: Option<&mut WorkQueue<String>>,
    publisher: &dyn Publisher,
    topic: Topic,
) -> Result<usize, CtlrError> {
    let mut published = 0;

    while let Some(node_id) = src.front().cloned() {
        publisher.publish(topic, &node_id)?;
        src.pop_front();

        if let Some(pub_q) = pub_q.as_deref_mut() {
            pub_q.push_back(node_id);
        }
        published += 1;
    }

    if published > 0 {
        tracing::info!("Published {} node id(s) on {}", published, topic);
    }

    Ok(published)
}

/// Builds the config message for `node_id` and publishes it on `cfg_msgs`.
pub fn publish_cfg_msg(
    trie: &IdTrie,
    node_id: &str,
    publisher: &dyn Publisher,
) -> Result<String, CtlrError> {
    let msg = build_config_msg(trie, node_id)?;
    publisher.publish(Topic::CfgMsgs, &msg)?;

    tracing::info!("Published config for node {}", node_id);
    Ok(msg)
}
