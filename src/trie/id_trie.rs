use super::types::{KeySide, Needs, TrieEntry};
use crate::error::ValidationError;
use crate::msgs::validate::{valid_network_id, valid_node_id};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Membership store keyed indifferently by node id or network id.
///
/// Backed by an ordered map over the hex keys, so iteration (and therefore
/// `find_dangling`) runs in lexicographic key order and prefix scans are range queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTrie {
    entries: BTreeMap<String, TrieEntry>,
}

impl IdTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one membership entry, replacing whatever was stored under the key.
    ///
    /// With `KeySide::Network`, `group[0]` is the key and `members` becomes its peer list.
    /// With `KeySide::Node`, `members[0]` is the key and `group` becomes its peer list.
    /// `needs` defaults to both flags cleared.
    pub fn update<S: AsRef<str>>(
        &mut self,
        group: &[S],
        members: &[S],
        needs: Option<Needs>,
        side: KeySide,
    ) -> Result<(), ValidationError> {
        let (key_list, peers) = match side {
            KeySide::Network => (group, members),
            KeySide::Node => (members, group),
        };

        let key = key_list.first().ok_or(ValidationError::EmptyKeyList)?.as_ref();
        match side {
            KeySide::Network => valid_network_id(key)?,
            KeySide::Node => valid_node_id(key)?,
        }

        let entry = TrieEntry {
            peers: peers.iter().map(|p| p.as_ref().to_string()).collect(),
            needs: needs.unwrap_or_default(),
        };

        tracing::debug!(
            "Trie update {:?} {} -> {} peer(s), needs={:?}",
            side,
            key,
            entry.peers.len(),
            entry.needs.0
        );

        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    /// Flattened `(dangling key, first peer)` pairs in key order.
    ///
    /// A dangling entry without peers has no counterpart to report and is skipped.
    pub fn find_dangling(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.needs.is_dangling())
            .filter_map(|(key, entry)| {
                entry
                    .peers
                    .first()
                    .map(|peer| (key.clone(), peer.clone()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&TrieEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys starting with `prefix`, in order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Drops every entry. Maintenance/test reset only.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TrieEntry)> {
        self.entries.iter()
    }
}
