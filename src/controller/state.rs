use crate::error::CtlrError;
use crate::queue::{KeyedRecord, QueueEntry, QueueStore, WorkQueue};
use crate::trie::IdTrie;

const NODE_Q: &str = "node_q";
const REG_Q: &str = "reg_q";
const WAIT_Q: &str = "wait_q";
const CFG_Q: &str = "cfg_q";
const HOLD_Q: &str = "hold_q";
const ID_TRIE: &str = "id_trie";

/// Every mutable structure the controller owns.
///
/// Nothing outside this struct holds queue or trie state; the service keeps it behind a
/// single lock so only one step mutates it at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Freshly announced ids awaiting classification.
    pub node_q: WorkQueue<String>,
    /// Registered ids; a node may appear more than once.
    pub reg_q: WorkQueue<String>,
    /// Ids waiting for registration, one entry per announce.
    pub wait_q: WorkQueue<String>,
    /// Config messages waiting for their node.
    pub cfg_q: WorkQueue<KeyedRecord>,
    /// Deferred config messages and miss markers.
    pub hold_q: WorkQueue<QueueEntry>,
    pub trie: IdTrie,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the last snapshot; missing snapshots start empty.
    pub fn load(store: &QueueStore) -> Result<Self, CtlrError> {
        let state = Self {
            node_q: store.load(NODE_Q)?,
            reg_q: store.load(REG_Q)?,
            wait_q: store.load(WAIT_Q)?,
            cfg_q: store.load(CFG_Q)?,
            hold_q: store.load(HOLD_Q)?,
            trie: store.load(ID_TRIE)?,
        };

        tracing::info!(
            "Restored state: {} announced, {} registered, {} waiting, {} configs, {} held, {} trie entries",
            state.node_q.len(),
            state.reg_q.len(),
            state.wait_q.len(),
            state.cfg_q.len(),
            state.hold_q.len(),
            state.trie.len()
        );

        Ok(state)
    }

    pub fn persist(&self, store: &QueueStore) -> Result<(), CtlrError> {
        store.save(NODE_Q, &self.node_q)?;
        store.save(REG_Q, &self.reg_q)?;
        store.save(WAIT_Q, &self.wait_q)?;
        store.save(CFG_Q, &self.cfg_q)?;
        store.save(HOLD_Q, &self.hold_q)?;
        store.save(ID_TRIE, &self.trie)?;
        Ok(())
    }

    /// Clears every queue and the trie.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Distinct waiting ids in first-seen order.
    pub fn waiting_nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = Vec::new();
        for node_id in self.wait_q.iter() {
            if !nodes.contains(node_id) {
                nodes.push(node_id.clone());
            }
        }
        nodes
    }

    /// Distinct ids that still own miss markers in `hold_q` but are no longer waiting.
    pub fn idle_holders(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for entry in self.hold_q.iter() {
            if let QueueEntry::Id(id) = entry
                && !self.wait_q.contains(id)
                && !ids.contains(id)
            {
                ids.push(id.clone());
            }
        }
        ids
    }
}
