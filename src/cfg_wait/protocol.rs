//! Config-Wait Protocol
//!
//! Matches a waiting node against the stream of pending config messages. The hold queue
//! collects config records that belonged to someone else together with one miss marker per
//! failed attempt. The escalation ladder is:
//!
//! 1. A miss while live config traffic is flowing (record deferred, marker added).
//! 2. A miss while `cfg_q` is dry (marker added).
//! 3. Once `MISS_THRESHOLD` markers have accumulated and `cfg_q` is still dry, the deferred
//!    records go back to `cfg_q` and the node is registered without a config message.

use crate::queue::{KeyedRecord, QueueEntry, WorkQueue};

/// Miss markers a node may accumulate before it is registered unconditionally.
pub const MISS_THRESHOLD: usize = 2;

/// Tries to find the config message for `node_id`.
///
/// Returns the matching record, or `None` on a miss. Only the threshold fallback touches
/// `reg_q`.
pub fn await_config(
    cfg_q: &mut WorkQueue<KeyedRecord>,
    hold_q: &mut WorkQueue<QueueEntry>,
    reg_q: &mut WorkQueue<String>,
    node_id: &str,
) -> Option<KeyedRecord> {
    if let Some(record) = cfg_q.pop_front() {
        if record.key == node_id {
            tracing::info!("Config message matched for node {}", node_id);
            return Some(record);
        }

        tracing::debug!(
            "Config for {} does not match {}, holding it",
            record.key,
            node_id
        );
        hold_q.push_back(QueueEntry::Record(record));
        hold_q.push_back(QueueEntry::Id(node_id.to_string()));
        return None;
    }

    let misses = hold_q.iter().filter(|entry| entry.is_id(node_id)).count();

    if misses < MISS_THRESHOLD {
        tracing::debug!(
            "No config for {} (miss {} of {})",
            node_id,
            misses + 1,
            MISS_THRESHOLD
        );
        hold_q.push_back(QueueEntry::Id(node_id.to_string()));
        return None;
    }

    let requeued = process_hold_queue(hold_q, cfg_q);
    tracing::info!(
        "No config for {} after {} misses, registering without one ({} held config(s) requeued)",
        node_id,
        misses,
        requeued
    );
    reg_q.push_back(node_id.to_string());

    None
}

/// Returns every held config record to the tail of `cfg_q`, in held order, and empties
/// `hold_q` (markers included). Returns the number of records requeued.
pub fn process_hold_queue(
    hold_q: &mut WorkQueue<QueueEntry>,
    cfg_q: &mut WorkQueue<KeyedRecord>,
) -> usize {
    let mut requeued = 0;

    for entry in hold_q.drain() {
        if let QueueEntry::Record(record) = entry {
            cfg_q.push_back(record);
            requeued += 1;
        }
    }

    requeued
}

/// Forgets a node that stopped waiting.
///
/// Drops its miss markers and sends every record it deferred (the record held right before
/// one of its markers) back to the tail of `cfg_q`. Other entries keep their order.
/// Returns the number of records requeued.
pub fn release_node(
    hold_q: &mut WorkQueue<QueueEntry>,
    cfg_q: &mut WorkQueue<KeyedRecord>,
    node_id: &str,
) -> usize {
    let mut entries = hold_q.drain().into_iter().peekable();
    let mut requeued = 0;

    while let Some(entry) = entries.next() {
        let deferred_by_node = entries.peek().is_some_and(|next| next.is_id(node_id));

        match entry {
            QueueEntry::Id(id) if id == node_id => {}
            QueueEntry::Record(record) if deferred_by_node => {
                cfg_q.push_back(record);
                requeued += 1;
            }
            other => hold_q.push_back(other),
        }
    }

    if requeued > 0 {
        tracing::debug!(
            "Released {}: {} deferred config(s) requeued",
            node_id,
            requeued
        );
    }

    requeued
}
