//! Membership Trie Module
//!
//! Tracks which overlay networks each node belongs to and which nodes each network holds.
//! Every entry carries two reconciliation flags; an entry whose second flag is set is a
//! dangling half-link that the controller surfaces for repair.

pub mod id_trie;
pub mod types;

pub use id_trie::IdTrie;
pub use types::{KeySide, Needs, TrieEntry};

#[cfg(test)]
mod tests;
