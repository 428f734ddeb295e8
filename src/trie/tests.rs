//! Trie Module Tests
//!
//! ## Test Scopes
//! - **Update**: key selection per side, overwrite semantics, default flags, preconditions.
//! - **Dangling Sweep**: only entries with the second flag set are reported, in key order.

#[cfg(test)]
mod tests {
    use crate::error::ValidationError;
    use crate::trie::{IdTrie, KeySide, Needs, TrieEntry};

    const NODE1: &str = "beef01dead";
    const NODE2: &str = "beef02dead";
    const NODE3: &str = "beef03dead";
    const NET1: &str = "7ac4235ec5d3d938";
    const NET2: &str = "7ac4235ec5d3d947";
    const NET3: &str = "7ac4235ec53f3198";

    // ============================================================
    // UPDATE TESTS
    // ============================================================

    #[test]
    fn test_update_network_side() {
        let mut trie = IdTrie::new();

        trie.update(&[NET1], &[NODE2], None, KeySide::Network).unwrap();

        let entry = trie.get(NET1).expect("network entry");
        assert_eq!(
            entry,
            &TrieEntry {
                peers: vec![NODE2.to_string()],
                needs: Needs([false, false]),
            }
        );
        assert!(!trie.contains(NODE2));
    }

    #[test]
    fn test_update_node_side() {
        let mut trie = IdTrie::new();

        trie.update(&[NET1, NET2], &[NODE1], None, KeySide::Node)
            .unwrap();

        let entry = trie.get(NODE1).expect("node entry");
        assert_eq!(entry.peers, vec![NET1.to_string(), NET2.to_string()]);
        assert_eq!(entry.needs, Needs::CONFIRMED);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_update_overwrites_existing_entry() {
        let mut trie = IdTrie::new();
        trie.update(&[NET1, NET2], &[NODE1], None, KeySide::Node)
            .unwrap();

        trie.update(&[NET3], &[NODE1], Some(Needs::new(true, false)), KeySide::Node)
            .unwrap();

        let entry = trie.get(NODE1).unwrap();
        assert_eq!(entry.peers, vec![NET3.to_string()]);
        assert_eq!(entry.needs, Needs([true, false]));
    }

    #[test]
    fn test_update_empty_key_list_fails() {
        let mut trie = IdTrie::new();
        let empty: [&str; 0] = [];

        let res = trie.update(&[NET1], &empty, None, KeySide::Node);
        assert_eq!(res, Err(ValidationError::EmptyKeyList));

        let res = trie.update(&empty, &[NODE1], None, KeySide::Network);
        assert_eq!(res, Err(ValidationError::EmptyKeyList));

        assert!(trie.is_empty());
    }

    #[test]
    fn test_update_malformed_key_fails() {
        let mut trie = IdTrie::new();

        // network id where a node id belongs
        let res = trie.update(&[NET1], &[NET2], None, KeySide::Node);
        assert!(matches!(res, Err(ValidationError::BadLength { .. })));

        let res = trie.update(&["7ac4235ec5d3d93z"], &[NODE1], None, KeySide::Network);
        assert!(matches!(res, Err(ValidationError::NotHex { .. })));

        assert!(trie.is_empty());
    }

    // ============================================================
    // DANGLING SWEEP TESTS
    // ============================================================

    #[test]
    fn test_find_dangling_nets() {
        let mut trie = IdTrie::new();
        trie.update(&[NET1], &[NODE1], Some(Needs::new(false, false)), KeySide::Node)
            .unwrap();
        trie.update(&[NET2], &[NODE1, NODE2], Some(Needs::new(false, false)), KeySide::Network)
            .unwrap();
        assert!(trie.find_dangling().is_empty());

        trie.update(&[NET1], &[NODE1], Some(Needs::new(false, true)), KeySide::Network)
            .unwrap();

        assert_eq!(
            trie.find_dangling(),
            vec![(NET1.to_string(), NODE1.to_string())]
        );
    }

    #[test]
    fn test_find_dangling_reports_only_flagged_entry() {
        let mut trie = IdTrie::new();
        trie.update(&[NET1, NET2], &[NODE1], Some(Needs::new(true, false)), KeySide::Node)
            .unwrap();
        trie.update(&[NET3, NET1], &[NODE2], Some(Needs::new(false, true)), KeySide::Node)
            .unwrap();

        assert_eq!(
            trie.find_dangling(),
            vec![(NODE2.to_string(), NET3.to_string())]
        );
    }

    #[test]
    fn test_find_dangling_follows_key_order() {
        let mut trie = IdTrie::new();
        let dangling = Some(Needs::new(false, true));
        trie.update(&[NET1], &[NODE3], dangling, KeySide::Node).unwrap();
        trie.update(&[NET2], &[NODE1], dangling, KeySide::Node).unwrap();

        let keys: Vec<String> = trie.find_dangling().into_iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec![NODE1.to_string(), NODE3.to_string()]);
    }

    #[test]
    fn test_find_dangling_skips_entry_without_peers() {
        let mut trie = IdTrie::new();
        let empty: [&str; 0] = [];
        trie.update(&[NET1], &empty, Some(Needs::new(false, true)), KeySide::Network)
            .unwrap();

        assert!(trie.find_dangling().is_empty());
    }

    // ============================================================
    // MAINTENANCE TESTS
    // ============================================================

    #[test]
    fn test_clear_and_is_empty() {
        let mut trie = IdTrie::new();
        assert!(trie.is_empty());

        trie.update(&[NET1], &[NODE1], None, KeySide::Node).unwrap();
        assert!(!trie.is_empty());

        trie.clear();
        assert!(trie.is_empty());
    }

    #[test]
    fn test_keys_with_prefix() {
        let mut trie = IdTrie::new();
        trie.update(&[NET1], &[NODE1], None, KeySide::Node).unwrap();
        trie.update(&[NET1], &[NODE2], None, KeySide::Node).unwrap();
        trie.update(&[NET2], &[NODE1], None, KeySide::Network).unwrap();

        assert_eq!(
            trie.keys_with_prefix("beef0"),
            vec![NODE1.to_string(), NODE2.to_string()]
        );
        assert_eq!(trie.keys_with_prefix("7ac4"), vec![NET2.to_string()]);
        assert!(trie.keys_with_prefix("ff").is_empty());
    }
}
