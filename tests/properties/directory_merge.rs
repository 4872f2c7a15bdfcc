//! Property tests for directory merging.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::tempdir;

use claude_sync::application::merge::{merge_directory, DirectoryMode};

fn tree() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[a-c]/[a-d]\\.jsonl", "[a-z]{0,8}", 0..6)
}

fn write_tree(root: &Path, files: &BTreeMap<String, String>) {
    fs::create_dir_all(root).unwrap();
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: append mode never changes an existing local file and ends
    /// with every remote path present.
    #[test]
    fn property_append_never_overwrites(local in tree(), remote in tree()) {
        let dir = tempdir().unwrap();
        let local_root = dir.path().join("local");
        let remote_root = dir.path().join("remote");
        write_tree(&local_root, &local);
        write_tree(&remote_root, &remote);

        let stats = merge_directory(&remote_root, &local_root, DirectoryMode::Append).unwrap();

        for (rel, content) in &local {
            prop_assert_eq!(&fs::read_to_string(local_root.join(rel)).unwrap(), content);
        }
        for (rel, content) in &remote {
            let expected = local.get(rel).unwrap_or(content);
            prop_assert_eq!(&fs::read_to_string(local_root.join(rel)).unwrap(), expected);
        }
        let new_paths = remote.keys().filter(|rel| !local.contains_key(*rel)).count();
        prop_assert_eq!(stats.copied, new_paths);
        prop_assert_eq!(stats.replaced, 0);
        prop_assert!(stats.backups.is_empty());
    }

    /// PROPERTY: update mode is a no-op the second time round.
    #[test]
    fn property_update_is_idempotent(local in tree(), remote in tree()) {
        let dir = tempdir().unwrap();
        let local_root = dir.path().join("local");
        let remote_root = dir.path().join("remote");
        write_tree(&local_root, &local);
        write_tree(&remote_root, &remote);

        merge_directory(&remote_root, &local_root, DirectoryMode::Update).unwrap();
        let again = merge_directory(&remote_root, &local_root, DirectoryMode::Update).unwrap();

        prop_assert_eq!(again.written(), 0);
        for rel in remote.keys() {
            prop_assert!(local_root.join(rel).is_file());
        }
    }
}
