//! ProfileManager: the context every host operation runs against
//!
//! Ties the profile store to one live root. Operations that rewrite the live
//! root hold its write guard for their whole duration, including the
//! matching step that decides which profile is being replaced.

use std::path::{Path, PathBuf};

use loadout_fs::{Fingerprinter, IgnoreSet, Subtree, tree};

use crate::live::{LiveRoot, LiveSnapshot};
use crate::matcher;
use crate::settings::Settings;
use crate::store::{NewProfile, Profile, ProfileMetadata, ProfileSource, ProfileStore};
use crate::sync::{ApplyReport, CompareReport, SyncEngine, SyncOptions, compare_profile};
use crate::{Error, Result};

/// The target of an apply and the current profile it would replace
#[derive(Debug, Clone)]
pub struct ApplyPlan {
    pub target: Profile,
    pub previous: Option<Profile>,
}

impl ApplyPlan {
    pub fn previous_id(&self) -> Option<&str> {
        self.previous.as_ref().map(|p| p.id.as_str())
    }
}

/// Profile operations bound to one profiles root and one live root
#[derive(Debug)]
pub struct ProfileManager {
    /// Profile directories
    store: ProfileStore,
    /// Live game directory and its guard
    live: LiveRoot,
    /// Fingerprinting configuration (ignore set, observer)
    fingerprinter: Fingerprinter,
}

impl ProfileManager {
    pub fn new(profiles_dir: impl Into<PathBuf>, live_root: impl Into<PathBuf>) -> Self {
        Self {
            store: ProfileStore::new(profiles_dir),
            live: LiveRoot::new(live_root),
            fingerprinter: Fingerprinter::new(IgnoreSet::default()),
        }
    }

    /// Build a manager from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LiveRootNotConfigured`] when no live root is set.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let live_root = settings.resolved_live_root()?;
        let profiles_dir = settings.resolved_profiles_dir()?;
        Ok(Self::new(profiles_dir, live_root))
    }

    /// Replace the fingerprinter, e.g. to attach a trace observer.
    pub fn with_fingerprinter(mut self, fingerprinter: Fingerprinter) -> Self {
        self.fingerprinter = fingerprinter;
        self
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn live_root(&self) -> &Path {
        self.live.path()
    }

    pub fn fingerprinter(&self) -> &Fingerprinter {
        &self.fingerprinter
    }

    fn engine(&self) -> SyncEngine {
        SyncEngine::new(self.live.path())
    }

    /// Every profile, sorted by id.
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.store.list()
    }

    pub fn get_profile(&self, id: &str) -> Result<Profile> {
        self.store.get(id)
    }

    /// Index into `profiles` of the first one the live root holds.
    pub fn current_match_index(&self, profiles: &[Profile]) -> Option<usize> {
        let _guard = self.live.read();
        matcher::current_match_index(&self.fingerprinter, profiles, self.live.path())
    }

    /// The profile the live root currently holds, if any.
    pub fn current_profile(&self) -> Result<Option<Profile>> {
        let mut profiles = self.list_profiles()?;
        Ok(self
            .current_match_index(&profiles)
            .map(|index| profiles.swap_remove(index)))
    }

    /// Whether the live root holds the profile with this id.
    pub fn is_current(&self, id: &str) -> Result<bool> {
        let profile = self.store.get(id)?;
        let _guard = self.live.read();
        Ok(matcher::is_current(&self.fingerprinter, &profile, self.live.path()))
    }

    /// Resolve the target and the profile it replaces.
    ///
    /// Must be called with a live guard held.
    fn resolve_plan(&self, id: &str) -> Result<ApplyPlan> {
        let target = self.store.get(id)?;
        let mut profiles = self.store.list()?;
        let previous = matcher::current_match_index(&self.fingerprinter, &profiles, self.live.path())
            .map(|index| profiles.swap_remove(index));
        Ok(ApplyPlan { target, previous })
    }

    /// Apply a profile, replacing whichever profile is current.
    pub fn apply_profile(&self, id: &str) -> Result<ApplyReport> {
        let _guard = self.live.write();
        let plan = self.resolve_plan(id)?;
        self.engine().apply(&plan.target, plan.previous.as_ref())
    }

    /// Resolve which profile applying `id` would replace, for confirmation.
    ///
    /// Pass the result to [`ProfileManager::apply_planned`].
    pub fn plan_apply(&self, id: &str) -> Result<ApplyPlan> {
        let _guard = self.live.read();
        self.resolve_plan(id)
    }

    /// Apply a confirmed plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without touching the live root when the
    /// current profile is no longer the one `plan` was resolved against.
    pub fn apply_planned(&self, plan: &ApplyPlan) -> Result<ApplyReport> {
        let _guard = self.live.write();
        let current = self.resolve_plan(&plan.target.id)?;
        if current.previous_id() != plan.previous_id() {
            return Err(Error::validation(format!(
                "Live root changed since the apply was planned: current profile is {}, expected {}",
                current.previous_id().unwrap_or("none"),
                plan.previous_id().unwrap_or("none"),
            )));
        }
        self.engine().apply(&current.target, current.previous.as_ref())
    }

    /// Report what [`ProfileManager::apply_profile`] would change.
    pub fn preview_apply(&self, id: &str) -> Result<ApplyReport> {
        let _guard = self.live.read();
        let plan = self.resolve_plan(id)?;
        self.engine()
            .with_options(SyncOptions { dry_run: true })
            .apply(&plan.target, plan.previous.as_ref())
    }

    /// Create a profile.
    ///
    /// A live-root snapshot is taken under the read guard.
    pub fn create_profile(&self, request: NewProfile) -> Result<Profile> {
        match &request.source {
            ProfileSource::Live(_) => {
                let _guard = self.live.read();
                self.store.create(request)
            }
            ProfileSource::Folders { .. } => self.store.create(request),
        }
    }

    /// Create a profile from this manager's live root.
    pub fn create_profile_from_live(&self, metadata: ProfileMetadata) -> Result<Profile> {
        self.create_profile(NewProfile::new(
            metadata,
            ProfileSource::Live(self.live.path().to_path_buf()),
        ))
    }

    /// Delete a profile, optionally removing the live `cfg/` and `custom/`.
    pub fn delete_profile(&self, id: &str, also_purge_live: bool) -> Result<()> {
        self.store.delete(id)?;

        if also_purge_live {
            let _guard = self.live.write();
            for subtree in Subtree::ALL {
                if tree::remove_tree(&self.live.subtree(subtree))? {
                    tracing::info!(subtree = %subtree, "removed live subtree");
                }
            }
        }
        Ok(())
    }

    pub fn edit_profile_metadata(&self, id: &str, metadata: ProfileMetadata) -> Result<Profile> {
        self.store.update_metadata(id, metadata)
    }

    /// Remove the entire live root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the live root is not an existing
    /// directory; nothing is removed in that case.
    pub fn fresh_install(&self) -> Result<()> {
        let _guard = self.live.write();
        let root = self.live.path();
        if !root.is_dir() {
            return Err(Error::validation(format!(
                "Live root is not a directory: {}",
                root.display()
            )));
        }

        tree::remove_tree(root)?;
        tracing::info!(path = %root.display(), "removed live root");
        Ok(())
    }

    /// Per-file differences between a profile and the live root.
    pub fn compare(&self, id: &str) -> Result<CompareReport> {
        let profile = self.store.get(id)?;
        let _guard = self.live.read();
        Ok(compare_profile(&self.fingerprinter, &profile, self.live.path()))
    }

    /// Folder fingerprints of the live subtrees.
    pub fn live_snapshot(&self) -> LiveSnapshot {
        self.live.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn setup_manager() -> (TempDir, ProfileManager) {
        let dir = tempdir().unwrap();
        let manager = ProfileManager::new(dir.path().join("profiles"), dir.path().join("tf"));
        (dir, manager)
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn from_settings_requires_live_root() {
        let settings = Settings {
            profiles_dir: Some(PathBuf::from("/p")),
            ..Settings::default()
        };
        assert!(matches!(
            ProfileManager::from_settings(&settings),
            Err(Error::LiveRootNotConfigured)
        ));
    }

    #[test]
    fn snapshot_of_live_becomes_current() {
        let (dir, manager) = setup_manager();
        write(&dir.path().join("tf"), "cfg/autoexec.cfg", "exec x");

        let profile = manager
            .create_profile_from_live(ProfileMetadata::new("Main"))
            .unwrap();

        assert_eq!(manager.current_profile().unwrap(), Some(profile));
        assert!(manager.is_current("Main").unwrap());
    }

    #[test]
    fn fresh_install_refuses_missing_root() {
        let (_dir, manager) = setup_manager();
        assert!(matches!(manager.fresh_install(), Err(Error::Validation { .. })));
    }

    #[test]
    fn fresh_install_removes_live_root() {
        let (dir, manager) = setup_manager();
        write(&dir.path().join("tf"), "cfg/a.cfg", "");
        write(&dir.path().join("tf"), "maps/x.bsp", "");

        manager.fresh_install().unwrap();
        assert!(!dir.path().join("tf").exists());
    }

    #[test]
    fn delete_with_purge_removes_live_subtrees() {
        let (dir, manager) = setup_manager();
        let live = dir.path().join("tf");
        write(&live, "cfg/a.cfg", "");
        write(&live, "custom/b.res", "");
        write(&live, "gameinfo.txt", "");
        manager.create_profile_from_live(ProfileMetadata::new("x")).unwrap();

        manager.delete_profile("x", true).unwrap();

        assert!(!live.join("cfg").exists());
        assert!(!live.join("custom").exists());
        assert!(live.join("gameinfo.txt").exists());
        assert!(manager.list_profiles().unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_profile_leaves_live_alone() {
        let (dir, manager) = setup_manager();
        write(&dir.path().join("tf"), "cfg/a.cfg", "");
        assert!(matches!(
            manager.delete_profile("nope", true),
            Err(Error::ProfileNotFound { .. })
        ));
        assert!(dir.path().join("tf/cfg/a.cfg").exists());
    }
}
