use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An ordered, duplicate-permitting FIFO of work entries.
///
/// This is the in-process face of the persistent queue collaborator: append to the tail,
/// pop from the head, iterate in order, length and membership. Durability is layered on
/// top by `QueueStore`, which snapshots whole queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkQueue<T> {
    items: VecDeque<T>,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keeps only the entries matching `keep`, preserving their order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(keep);
    }

    /// Removes every entry and returns them in queue order.
    pub fn drain(&mut self) -> Vec<T> {
        self.items.drain(..).collect()
    }
}

impl<T: PartialEq> WorkQueue<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of entries equal to `item`.
    pub fn count(&self, item: &T) -> usize {
        self.items.iter().filter(|entry| *entry == item).count()
    }
}

impl<T: Clone> WorkQueue<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for WorkQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for WorkQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// A queue entry tagged with a lookup key.
///
/// Config messages travel through `cfg_q`/`hold_q` as records keyed by their `node_id`,
/// with the raw JSON text as the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyedRecord {
    pub key: String,
    pub value: String,
}

impl KeyedRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Entry of a queue that mixes bare ids with keyed records (the hold queue).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueEntry {
    /// A bare node id (miss marker in the hold queue).
    Id(String),
    Record(KeyedRecord),
}

impl QueueEntry {
    pub fn is_id(&self, node_id: &str) -> bool {
        matches!(self, QueueEntry::Id(id) if id == node_id)
    }
}

impl From<KeyedRecord> for QueueEntry {
    fn from(record: KeyedRecord) -> Self {
        QueueEntry::Record(record)
    }
}

/// Anything `find_by_key` can match on.
///
/// Scalars compare themselves directly; records compare their key field.
pub trait KeyedEntry {
    fn entry_key(&self) -> &str;
}

impl KeyedEntry for String {
    fn entry_key(&self) -> &str {
        self
    }
}

impl KeyedEntry for KeyedRecord {
    fn entry_key(&self) -> &str {
        &self.key
    }
}

impl KeyedEntry for QueueEntry {
    fn entry_key(&self) -> &str {
        match self {
            QueueEntry::Id(id) => id,
            QueueEntry::Record(record) => &record.key,
        }
    }
}
