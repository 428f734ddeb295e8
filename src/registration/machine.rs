//! Registration State Machine
//!
//! A node's state is never stored explicitly; it is read off queue membership:
//!
//! ```text
//! unseen -> announced (node_q) -> waiting (wait_q)
//!                              -> registered (reg_q, possibly several times)
//! ```

use crate::error::ValidationError;
use crate::msgs::valid_announce;
use crate::queue::{WorkQueue, remove_all};

/// Moves every announced id to the tail of `wait_q`, in order, without any registration
/// check. `node_q` ends empty.
pub fn drain_to_wait(node_q: &mut WorkQueue<String>, wait_q: &mut WorkQueue<String>) {
    let moved = node_q.len();
    wait_q.extend(node_q.drain());
    tracing::debug!("Drained {} announced node(s) to wait queue", moved);
}

/// Classifies every announced id.
///
/// Registered ids have all their waiting entries purged; anything else is appended to
/// `wait_q`. `node_q` ends empty. Returns the ids processed, in announce order.
pub fn reconcile(
    node_q: &mut WorkQueue<String>,
    reg_q: &WorkQueue<String>,
    wait_q: &mut WorkQueue<String>,
) -> Vec<String> {
    let mut seen = Vec::with_capacity(node_q.len());

    while let Some(node_id) = node_q.pop_front() {
        if reg_q.contains(&node_id) {
            let purged = remove_all(&node_id, wait_q);
            tracing::debug!(
                "Node {} is registered, cleared {} waiting entries",
                node_id,
                purged
            );
        } else {
            tracing::debug!("Node {} not registered yet, waiting", node_id);
            wait_q.push_back(node_id.clone());
        }
        seen.push(node_id);
    }

    seen
}

/// Drops waiting entries whose id was not announced again in the latest pass.
///
/// Announces double as heartbeats: a node that stops announcing expires from `wait_q`.
pub fn expire_waiting(wait_q: &mut WorkQueue<String>, seen: &[String]) -> usize {
    let before = wait_q.len();
    wait_q.retain(|node_id| seen.contains(node_id));
    let expired = before - wait_q.len();

    if expired > 0 {
        tracing::info!("Expired {} stale waiting entries", expired);
    }

    expired
}

/// Promotes an announced node to registered.
///
/// The id must be a well-formed announce and currently sit in `node_q`. Duplicate
/// registrations are allowed. `wait_q` is left alone; the next `reconcile` clears it.
pub fn register(
    node_q: &WorkQueue<String>,
    reg_q: &mut WorkQueue<String>,
    wait_q: &WorkQueue<String>,
    node_id: &str,
) -> Result<(), ValidationError> {
    valid_announce(node_id)?;

    let node_id = node_id.to_string();
    if !node_q.contains(&node_id) {
        tracing::warn!("Refusing to register {}: never announced", node_id);
        return Err(ValidationError::NotAnnounced(node_id));
    }

    if reg_q.contains(&node_id) {
        tracing::debug!("Node {} registering again", node_id);
    }

    tracing::info!(
        "Registered node {} (waiting entries pending cleanup: {})",
        node_id,
        wait_q.count(&node_id)
    );
    reg_q.push_back(node_id);

    Ok(())
}
