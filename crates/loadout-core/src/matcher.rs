//! Deciding which profile the live root currently holds
//!
//! A profile matches when, for both subtrees, the live root holds exactly the
//! profile's bytes at every path the profile owns. Files that exist only in
//! the live root never affect the outcome.

use std::path::Path;

use loadout_fs::{Fingerprint, Fingerprinter, Subtree};

use crate::store::Profile;

/// Whether the live copy of one subtree matches the profile's copy.
fn subtree_matches(fingerprinter: &Fingerprinter, reference: &Path, live: &Path) -> bool {
    let live_fp = fingerprinter.subset(reference, live);
    let self_fp = fingerprinter.subset(reference, reference);
    match (&live_fp, &self_fp) {
        (Fingerprint::Empty, Fingerprint::Empty) => true,
        (Fingerprint::Digest(live), Fingerprint::Digest(own)) => live == own,
        _ => false,
    }
}

/// Whether `live_root` currently holds `profile`.
pub fn is_current(fingerprinter: &Fingerprinter, profile: &Profile, live_root: &Path) -> bool {
    Subtree::ALL.into_iter().all(|subtree| {
        subtree_matches(
            fingerprinter,
            &profile.subtree(subtree),
            &live_root.join(subtree),
        )
    })
}

/// Index of the first profile, in the given order, that the live root holds.
pub fn current_match_index(
    fingerprinter: &Fingerprinter,
    profiles: &[Profile],
    live_root: &Path,
) -> Option<usize> {
    profiles
        .iter()
        .position(|profile| is_current(fingerprinter, profile, live_root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProfileMetadata;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn profile(root: &Path, id: &str) -> Profile {
        let path = root.join(id);
        fs::create_dir_all(&path).unwrap();
        Profile {
            id: id.to_string(),
            path,
            metadata: ProfileMetadata::new(id),
        }
    }

    #[test]
    fn empty_profile_matches_any_live_root() {
        let dir = tempdir().unwrap();
        let p = profile(dir.path(), "empty");
        write(dir.path(), "live/cfg/unrelated.cfg", "x");
        assert!(is_current(&Fingerprinter::default(), &p, &dir.path().join("live")));
        assert!(is_current(&Fingerprinter::default(), &p, &dir.path().join("absent")));
    }

    #[test]
    fn profile_with_files_does_not_match_absent_live_subtree() {
        let dir = tempdir().unwrap();
        let p = profile(dir.path(), "p");
        write(&p.path, "custom/hud/a.res", "hud");
        assert!(!is_current(&Fingerprinter::default(), &p, &dir.path().join("live")));
    }

    #[test]
    fn first_match_in_order_wins() {
        let dir = tempdir().unwrap();
        let a = profile(dir.path(), "a");
        let b = profile(dir.path(), "b");
        write(&a.path, "cfg/x.cfg", "1");
        write(&b.path, "cfg/y.cfg", "2");
        write(dir.path(), "live/cfg/x.cfg", "1");
        write(dir.path(), "live/cfg/y.cfg", "2");

        let live = dir.path().join("live");
        let fingerprinter = Fingerprinter::default();
        assert_eq!(current_match_index(&fingerprinter, &[a.clone(), b.clone()], &live), Some(0));
        assert_eq!(current_match_index(&fingerprinter, &[b, a], &live), Some(0));
        assert_eq!(current_match_index(&fingerprinter, &[], &live), None);
    }
}
