use serde::{Deserialize, Serialize};

/// Reconciliation flags of a membership link.
///
/// Always exactly two flags. The second one marks the entry as dangling: the other side of
/// the link has not reciprocated yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Needs(pub [bool; 2]);

impl Needs {
    pub const CONFIRMED: Needs = Needs([false, false]);

    pub fn new(first: bool, dangling: bool) -> Self {
        Needs([first, dangling])
    }

    pub fn is_dangling(&self) -> bool {
        self.0[1]
    }
}

impl From<[bool; 2]> for Needs {
    fn from(flags: [bool; 2]) -> Self {
        Needs(flags)
    }
}

/// Value stored under a trie key: the associated ids and the link flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieEntry {
    pub peers: Vec<String>,
    pub needs: Needs,
}

/// Which side of the node/network relation supplies the key of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySide {
    /// Key is a node id; the peers are its networks.
    Node,
    /// Key is a network id; the peers are its member nodes.
    Network,
}
