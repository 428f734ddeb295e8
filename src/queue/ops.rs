use super::types::{KeyedEntry, WorkQueue};

/// Removes every entry equal to `item`, keeping the rest in order.
///
/// Equality is structural, so a keyed record only matches an identical record.
/// Absent items are a no-op. Returns the number of entries removed.
pub fn remove_all<T: PartialEq>(item: &T, queue: &mut WorkQueue<T>) -> usize {
    let before = queue.len();
    queue.retain(|entry| entry != item);
    let removed = before - queue.len();

    if removed > 0 {
        tracing::trace!("Removed {} matching queue entries", removed);
    }

    removed
}

/// Returns a copy of the first entry whose key equals `key`, scanning head to tail.
pub fn find_by_key<T>(key: &str, queue: &WorkQueue<T>) -> Option<T>
where
    T: KeyedEntry + Clone,
{
    queue.iter().find(|entry| entry.entry_key() == key).cloned()
}

/// True when `queue` holds work for the next tick.
pub fn check_return_status<T>(queue: &WorkQueue<T>) -> bool {
    !queue.is_empty()
}
