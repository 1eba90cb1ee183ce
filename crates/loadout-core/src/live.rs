//! The live root and its mutation guard
//!
//! Mutations (apply, fresh install, purge) hold the write side; anything that
//! fingerprints the live root holds the read side. A tree is therefore never
//! hashed while it is being rewritten.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use loadout_fs::{Digest, Subtree, folder_fingerprint};
use serde::{Deserialize, Serialize};

/// Folder fingerprints of the live subtrees at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    /// Fingerprint of live `cfg/`, `None` if absent
    pub cfg: Option<Digest>,
    /// Fingerprint of live `custom/`, `None` if absent
    pub custom: Option<Digest>,
}

impl LiveSnapshot {
    /// Fingerprint the live subtrees under `root`.
    pub fn capture(root: &Path) -> Self {
        Self {
            cfg: folder_fingerprint(&root.join(Subtree::Cfg)),
            custom: folder_fingerprint(&root.join(Subtree::Custom)),
        }
    }
}

/// Game directory whose `cfg/` and `custom/` profiles are applied to
#[derive(Debug)]
pub struct LiveRoot {
    path: PathBuf,
    guard: RwLock<()>,
}

impl LiveRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn subtree(&self, subtree: Subtree) -> PathBuf {
        self.path.join(subtree)
    }

    /// Shared access for fingerprinting.
    ///
    /// The guard protects no data, so a poisoned lock is recovered.
    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.guard.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access for mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.guard.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fingerprint the live subtrees under the read guard.
    pub fn snapshot(&self) -> LiveSnapshot {
        let _guard = self.read();
        LiveSnapshot::capture(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn snapshot_changes_with_live_content() {
        let dir = tempdir().unwrap();
        let live = LiveRoot::new(dir.path());
        let empty = live.snapshot();
        assert_eq!(empty, LiveSnapshot::default());

        fs::create_dir_all(dir.path().join("cfg")).unwrap();
        fs::write(dir.path().join("cfg/autoexec.cfg"), "a").unwrap();
        let first = live.snapshot();
        assert!(first.cfg.is_some());
        assert!(first.custom.is_none());

        fs::write(dir.path().join("cfg/autoexec.cfg"), "b").unwrap();
        assert_ne!(first, live.snapshot());
    }
}
