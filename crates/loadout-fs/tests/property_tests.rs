use loadout_fs::{IgnoreSet, folder_fingerprint, subset_fingerprint};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn materialize(root: &Path, files: &[(String, Vec<u8>)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn file_set() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map(
        "(dir[a-c]/)?[a-e]{1,3}\\.cfg",
        prop::collection::vec(any::<u8>(), 0..64),
        1..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn folder_digest_is_independent_of_creation_order(files in file_set(), seed in any::<u64>()) {
        let forward: Vec<_> = files.clone().into_iter().collect();
        let mut shuffled = forward.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);
        shuffled.reverse();

        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        materialize(a.path(), &forward);
        materialize(b.path(), &shuffled);

        prop_assert_eq!(folder_fingerprint(a.path()), folder_fingerprint(b.path()));
    }

    #[test]
    fn live_superset_always_matches_self_subset(files in file_set(), extra in file_set()) {
        let reference = tempdir().unwrap();
        let live = tempdir().unwrap();
        let forward: Vec<_> = files.clone().into_iter().collect();
        let extras: Vec<_> = extra
            .into_iter()
            .map(|(path, content)| (format!("extra/{path}"), content))
            .collect();
        materialize(reference.path(), &forward);
        materialize(live.path(), &extras);
        materialize(live.path(), &forward);

        let ignore = IgnoreSet::default();
        prop_assert_eq!(
            subset_fingerprint(reference.path(), reference.path(), &ignore),
            subset_fingerprint(reference.path(), live.path(), &ignore)
        );
    }
}
