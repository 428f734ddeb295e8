//! Controller Service
//!
//! Owns the controller state behind one async lock and exposes the entry points the
//! transport and the scheduler drive:
//!
//! - **Ingress**: `handle_announce`, `handle_register`, `handle_cfg`, `handle_version`,
//!   `handle_offline`, each a short validated mutation.
//! - **Tick**: `tick` runs one reconcile pass (classify announces, expire silent nodes,
//!   match configs, sweep dangling links) and persists the result.
//! - **Background loop**: `start` runs `tick` on a fixed interval.

use super::protocol::{DanglingLink, StatusResponse, TickReport};
use super::state::ControllerState;
use crate::cfg_wait::{await_config, release_node};
use crate::config::ControllerConfig;
use crate::error::CtlrError;
use crate::msgs::{
    UPGRADE_REQUIRED, build_version_msg, parse_version_msg, valid_announce, valid_config,
    valid_version,
};
use crate::queue::{KeyedRecord, QueueEntry, QueueStore, find_by_key, remove_all};
use crate::registration::{expire_waiting, reconcile, register};
use crate::transport::{Publisher, Topic};
use crate::trie::{KeySide, Needs};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Flags written for a node whose config has been queued but not yet delivered.
const UNDELIVERED: Needs = Needs([false, true]);

pub struct ControllerService {
    state: Mutex<ControllerState>,
    publisher: Arc<dyn Publisher>,
    store: Option<QueueStore>,
    min_version: String,
    tick_interval: Duration,
}

impl ControllerService {
    /// Builds the service, restoring persisted state when a state directory is configured.
    pub fn new(
        config: &ControllerConfig,
        publisher: Arc<dyn Publisher>,
    ) -> Result<Arc<Self>, CtlrError> {
        let (state, store) = match &config.state_dir {
            Some(dir) => {
                let store = QueueStore::open(dir)?;
                (ControllerState::load(&store)?, Some(store))
            }
            None => {
                tracing::info!("No state directory configured, queues are in-memory only");
                (ControllerState::new(), None)
            }
        };

        Ok(Arc::new(Self {
            state: Mutex::new(state),
            publisher,
            store,
            min_version: config.min_version.clone(),
            tick_interval: config.tick_interval(),
        }))
    }

    fn persist(&self, state: &ControllerState) -> Result<(), CtlrError> {
        if let Some(store) = &self.store {
            state.persist(store)?;
        }
        Ok(())
    }

    /// Persists `next` and only then makes it the live state, so a failed write leaves the
    /// request unapplied.
    fn commit(
        &self,
        state: &mut ControllerState,
        next: ControllerState,
    ) -> Result<(), CtlrError> {
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    /// Queues a validated announce for the next reconcile pass.
    pub async fn handle_announce(&self, msg: &str) -> Result<(), CtlrError> {
        let node_id = msg.trim();
        if let Err(e) = valid_announce(node_id) {
            tracing::warn!("Dropping invalid announce {:?}: {}", msg, e);
            return Err(e.into());
        }

        let mut state = self.state.lock().await;
        let mut next = state.clone();
        next.node_q.push_back(node_id.to_string());
        tracing::debug!("Node {} announced ({} pending)", node_id, next.node_q.len());

        self.commit(&mut state, next)
    }

    /// Registers a node that has announced itself.
    pub async fn handle_register(&self, node_id: &str) -> Result<(), CtlrError> {
        let node_id = node_id.trim();
        let mut state = self.state.lock().await;
        let mut next = state.clone();

        register(&next.node_q, &mut next.reg_q, &next.wait_q, node_id)?;

        self.commit(&mut state, next)
    }

    /// Accepts a config message: records the node's networks in the trie and queues the
    /// message for the node to pick up.
    pub async fn handle_cfg(&self, msg: &str) -> Result<(), CtlrError> {
        let cfg = match valid_config(msg) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Dropping invalid config message: {}", e);
                return Err(e.into());
            }
        };

        let mut state = self.state.lock().await;
        let mut next = state.clone();

        // A reconfigured node leaves the networks it no longer lists
        let previous = next
            .trie
            .get(&cfg.node_id)
            .map(|entry| entry.peers.clone())
            .unwrap_or_default();
        for net_id in previous.iter().filter(|net| !cfg.networks.contains(net)) {
            if let Some(entry) = next.trie.get(net_id) {
                let members: Vec<String> = entry
                    .peers
                    .iter()
                    .filter(|peer| **peer != cfg.node_id)
                    .cloned()
                    .collect();
                let needs = entry.needs;
                next.trie.update(
                    std::slice::from_ref(net_id),
                    &members,
                    Some(needs),
                    KeySide::Network,
                )?;
            }
        }

        next.trie.update(
            &cfg.networks,
            std::slice::from_ref(&cfg.node_id),
            Some(UNDELIVERED),
            KeySide::Node,
        )?;

        for net_id in &cfg.networks {
            let (mut members, needs) = match next.trie.get(net_id) {
                Some(entry) => (entry.peers.clone(), entry.needs),
                None => (Vec::new(), Needs::CONFIRMED),
            };
            if !members.contains(&cfg.node_id) {
                members.push(cfg.node_id.clone());
            }
            next.trie.update(
                std::slice::from_ref(net_id),
                &members,
                Some(needs),
                KeySide::Network,
            )?;
        }

        let held = |entry: &QueueEntry| {
            matches!(entry, QueueEntry::Record(r) if r.key == cfg.node_id)
        };
        if find_by_key(&cfg.node_id, &next.cfg_q).is_some()
            || next.hold_q.iter().any(|entry| held(entry))
        {
            tracing::info!("Replacing pending config for node {}", cfg.node_id);
            next.cfg_q.retain(|record| record.key != cfg.node_id);
            next.hold_q.retain(|entry| !held(entry));
        }

        tracing::info!(
            "Queued config for node {} ({} network(s))",
            cfg.node_id,
            cfg.networks.len()
        );
        next.cfg_q.push_back(KeyedRecord::new(cfg.node_id, msg));

        self.commit(&mut state, next)
    }

    /// Answers a version message with our own version, or with `UPGRADE_REQUIRED` when the
    /// peer is older than the configured minimum (or sent no usable version).
    pub async fn handle_version(&self, msg: &str) -> Result<String, CtlrError> {
        let (node_id, version) = parse_version_msg(msg.trim());
        valid_announce(&node_id)?;

        if valid_version(&self.min_version, version.as_deref()) {
            tracing::debug!("Node {} version {:?} accepted", node_id, version);
            build_version_msg(&node_id, None)
        } else {
            tracing::warn!(
                "Node {} version {:?} below {}, upgrade required",
                node_id,
                version,
                self.min_version
            );
            build_version_msg(&node_id, Some(UPGRADE_REQUIRED))
        }
    }

    /// Forgets a node that went offline and announces its departure.
    pub async fn handle_offline(&self, node_id: &str) -> Result<(), CtlrError> {
        let node_id = node_id.trim();
        valid_announce(node_id)?;

        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let id = node_id.to_string();

        let removed = remove_all(&id, &mut next.node_q)
            + remove_all(&id, &mut next.wait_q)
            + remove_all(&id, &mut next.reg_q);
        release_node(&mut next.hold_q, &mut next.cfg_q, node_id);
        tracing::info!("Node {} offline, dropped {} queue entries", node_id, removed);

        self.commit(&mut state, next)?;
        self.publisher.publish(Topic::Offline, node_id)
    }

    /// One reconcile pass over all queues.
    pub async fn tick(&self) -> Result<TickReport, CtlrError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let mut report = TickReport::default();

        let seen = reconcile(&mut state.node_q, &state.reg_q, &mut state.wait_q);
        report.reconciled = seen.len();
        report.expired = expire_waiting(&mut state.wait_q, &seen);

        for node_id in state.waiting_nodes() {
            let registered_before = state.reg_q.len();

            match await_config(&mut state.cfg_q, &mut state.hold_q, &mut state.reg_q, &node_id) {
                Some(record) => {
                    if let Err(e) = self.publisher.publish(Topic::CfgMsgs, &record.value) {
                        tracing::error!("Failed to publish config for {}: {}", node_id, e);
                        state.cfg_q.push_back(record);
                        continue;
                    }

                    if let Some(entry) = state.trie.get(&node_id) {
                        let networks = entry.peers.clone();
                        state.trie.update(
                            &networks,
                            std::slice::from_ref(&node_id),
                            Some(Needs::CONFIRMED),
                            KeySide::Node,
                        )?;
                    }

                    state.reg_q.push_back(node_id.clone());
                    remove_all(&node_id, &mut state.wait_q);
                    report.matched.push(node_id);
                }
                None if state.reg_q.len() > registered_before => {
                    remove_all(&node_id, &mut state.wait_q);
                    report.fallback_registered.push(node_id);
                }
                None => {}
            }
        }

        for node_id in state.idle_holders() {
            release_node(&mut state.hold_q, &mut state.cfg_q, &node_id);
            report.released += 1;
        }

        let dangling = state.trie.find_dangling();
        for (key, peer) in &dangling {
            tracing::warn!("Dangling link: {} -> {} not yet reciprocated", key, peer);
        }
        report.dangling = dangling.len();
        report.still_waiting = state.wait_q.len();

        self.persist(state)?;

        tracing::debug!(
            "Tick: {} reconciled, {} expired, {} released, {} matched, {} fallback, {} waiting",
            report.reconciled,
            report.expired,
            report.released,
            report.matched.len(),
            report.fallback_registered.len(),
            report.still_waiting
        );

        Ok(report)
    }

    pub async fn status(&self) -> StatusResponse {
        let state = self.state.lock().await;

        StatusResponse {
            announced: state.node_q.len(),
            registered: state.reg_q.len(),
            waiting: state.wait_q.len(),
            pending_configs: state.cfg_q.len(),
            held: state.hold_q.len(),
            trie_entries: state.trie.len(),
        }
    }

    pub async fn dangling(&self) -> Vec<DanglingLink> {
        let state = self.state.lock().await;

        state
            .trie
            .find_dangling()
            .into_iter()
            .map(|(key, peer)| DanglingLink { key, peer })
            .collect()
    }

    /// Copy of the current state, for inspection.
    pub async fn snapshot(&self) -> ControllerState {
        self.state.lock().await.clone()
    }

    /// Spawns the periodic reconcile loop.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tracing::info!(
            "Starting reconcile loop (every {:?})",
            self.tick_interval
        );

        tokio::spawn(async move {
            self.tick_loop().await;
        })
    }

    async fn tick_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.tick_interval);

        loop {
            interval.tick().await;

            match self.tick().await {
                Ok(report) => {
                    if !report.matched.is_empty() || !report.fallback_registered.is_empty() {
                        tracing::info!(
                            "Registered {} node(s) with config, {} by fallback",
                            report.matched.len(),
                            report.fallback_registered.len()
                        );
                    }
                }
                Err(e) => {
                    tracing::error!("Reconcile tick failed: {}", e);
                }
            }
        }
    }
}
