//! SyncEngine implementation
//!
//! Applying a profile runs three phases against the live root, in order:
//!
//! 1. **Deleting**: every live file at a path the previous profile owns is
//!    removed. Directories are left in place and live files the previous
//!    profile never held are untouched.
//! 2. **Copying**: the target profile's subtrees are merged into the live
//!    root, overwriting files and preserving modification times.
//! 3. **PurgingCache**: every `*.cache` file under the live subtrees is
//!    removed.
//!
//! The first failure stops the run. Nothing is rolled back.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use loadout_fs::{CACHE_SUFFIX, NormalizedPath, Subtree, tree};
use serde::{Deserialize, Serialize};

use crate::store::Profile;
use crate::{Error, Result};

/// Step of an apply run, reported with failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyPhase {
    /// Removing the previous profile's files from the live root
    Deleting,
    /// Copying the target profile into the live root
    Copying,
    /// Removing runtime cache files
    PurgingCache,
}

impl std::fmt::Display for ApplyPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Deleting => "deleting previous profile files",
            Self::Copying => "copying profile files",
            Self::PurgingCache => "purging cache files",
        })
    }
}

/// Report from an apply or preview run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Id of the applied profile
    pub profile: String,
    /// Id of the profile whose files were removed first, if any
    pub previous: Option<String>,
    /// Whether the filesystem was left untouched
    pub dry_run: bool,
    /// Live paths removed because the previous profile owned them
    pub deleted: Vec<String>,
    /// Live paths written from the target profile
    pub copied: Vec<String>,
    /// Cache files removed at the end
    pub purged: Vec<String>,
    /// Human-readable summary of what happened
    pub actions: Vec<String>,
}

impl ApplyReport {
    fn new(target: &Profile, previous: Option<&Profile>, dry_run: bool) -> Self {
        Self {
            profile: target.id.clone(),
            previous: previous.map(|p| p.id.clone()),
            dry_run,
            deleted: Vec::new(),
            copied: Vec::new(),
            purged: Vec::new(),
            actions: Vec::new(),
        }
    }

    fn with_action(mut self, action: String) -> Self {
        let action = if self.dry_run {
            format!("[dry-run] Would {}", lowercase_first(&action))
        } else {
            action
        };
        self.actions.push(action);
        self
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn live_relative(subtree: Subtree, relative: &NormalizedPath) -> String {
    format!("{}/{}", subtree.as_str(), relative.as_str())
}

/// Options for apply runs
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, report what would change without modifying the filesystem.
    /// Actions will be prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

/// Engine applying profiles to one live root
#[derive(Debug, Clone)]
pub struct SyncEngine {
    /// Directory holding the live `cfg/` and `custom/`
    live_root: PathBuf,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(live_root: impl Into<PathBuf>) -> Self {
        Self {
            live_root: live_root.into(),
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn live_root(&self) -> &Path {
        &self.live_root
    }

    fn live_subtree(&self, subtree: Subtree) -> PathBuf {
        self.live_root.join(subtree)
    }

    /// Apply `target`, first removing the files `previous` owns.
    ///
    /// Honors [`SyncOptions::dry_run`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Apply`] naming the phase and path of the first
    /// failure. Steps already done stay done.
    pub fn apply(&self, target: &Profile, previous: Option<&Profile>) -> Result<ApplyReport> {
        if self.options.dry_run {
            return self.preview(target, previous);
        }

        tracing::debug!(
            target = %target.id,
            previous = previous.map(|p| p.id.as_str()),
            live_root = %self.live_root.display(),
            "applying profile"
        );

        let mut report = ApplyReport::new(target, previous, false);
        if let Some(previous) = previous {
            report = self.delete_previous(previous, report)?;
        }
        report = self.copy_target(target, report)?;
        report = self.purge_cache(report)?;

        tracing::info!(
            profile = %target.id,
            deleted = report.deleted.len(),
            copied = report.copied.len(),
            purged = report.purged.len(),
            "applied profile"
        );
        Ok(report)
    }

    fn delete_previous(&self, previous: &Profile, mut report: ApplyReport) -> Result<ApplyReport> {
        for subtree in Subtree::ALL {
            let live = self.live_subtree(subtree);
            for file in tree::walk_files(&previous.subtree(subtree)) {
                let file = file.map_err(|e| apply_error(ApplyPhase::Deleting, &live, e))?;
                let live_path = file.under(&live);
                if fs::symlink_metadata(&live_path).is_err() {
                    continue;
                }
                fs::remove_file(&live_path).map_err(|e| {
                    apply_error(ApplyPhase::Deleting, &live_path, loadout_fs::Error::io(&live_path, e))
                })?;
                report.deleted.push(live_relative(subtree, &file.relative));
            }
        }

        let count = report.deleted.len();
        Ok(report.with_action(format!(
            "Removed {count} file(s) of previous profile '{}'",
            previous.id
        )))
    }

    fn copy_target(&self, target: &Profile, mut report: ApplyReport) -> Result<ApplyReport> {
        for subtree in Subtree::ALL {
            if !target.has_subtree(subtree) {
                continue;
            }
            let live = self.live_subtree(subtree);
            let copied = tree::merge_tree(&target.subtree(subtree), &live)
                .map_err(|e| apply_error(ApplyPhase::Copying, &live, e))?;
            report
                .copied
                .extend(copied.iter().map(|relative| live_relative(subtree, relative)));
        }

        let count = report.copied.len();
        Ok(report.with_action(format!("Copied {count} file(s) of profile '{}'", target.id)))
    }

    fn purge_cache(&self, mut report: ApplyReport) -> Result<ApplyReport> {
        for subtree in Subtree::ALL {
            let live = self.live_subtree(subtree);
            let purged = tree::remove_files_with_suffix(&live, CACHE_SUFFIX)
                .map_err(|e| apply_error(ApplyPhase::PurgingCache, &live, e))?;
            report
                .purged
                .extend(purged.iter().map(|relative| live_relative(subtree, relative)));
        }

        let count = report.purged.len();
        Ok(report.with_action(format!("Purged {count} cache file(s)")))
    }

    /// Report what [`SyncEngine::apply`] would do without touching anything.
    pub fn preview(&self, target: &Profile, previous: Option<&Profile>) -> Result<ApplyReport> {
        let mut report = ApplyReport::new(target, previous, true);
        let mut removed = BTreeSet::new();

        if let Some(previous) = previous {
            for subtree in Subtree::ALL {
                let live = self.live_subtree(subtree);
                for file in tree::walk_files(&previous.subtree(subtree)) {
                    let file = file?;
                    if fs::symlink_metadata(file.under(&live)).is_ok() {
                        let path = live_relative(subtree, &file.relative);
                        removed.insert(path.clone());
                        report.deleted.push(path);
                    }
                }
            }
            let count = report.deleted.len();
            report = report.with_action(format!(
                "Remove {count} file(s) of previous profile '{}'",
                previous.id
            ));
        }

        let mut cache_files = BTreeSet::new();
        for subtree in Subtree::ALL {
            for file in tree::walk_files(&self.live_subtree(subtree)) {
                let file = file?;
                let path = live_relative(subtree, &file.relative);
                if file.file_name().ends_with(CACHE_SUFFIX) && !removed.contains(&path) {
                    cache_files.insert(path);
                }
            }

            if !target.has_subtree(subtree) {
                continue;
            }
            for file in tree::walk_files(&target.subtree(subtree)) {
                let file = file?;
                let path = live_relative(subtree, &file.relative);
                if file.file_name().ends_with(CACHE_SUFFIX) {
                    cache_files.insert(path.clone());
                }
                report.copied.push(path);
            }
        }

        let count = report.copied.len();
        report = report.with_action(format!("Copy {count} file(s) of profile '{}'", target.id));

        report.purged = cache_files.into_iter().collect();
        let count = report.purged.len();
        Ok(report.with_action(format!("Purge {count} cache file(s)")))
    }
}

fn apply_error(phase: ApplyPhase, fallback: &Path, source: loadout_fs::Error) -> Error {
    let path = source
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    tracing::warn!(%phase, path = %path.display(), error = %source, "apply aborted");
    Error::Apply {
        phase,
        path,
        source,
    }
}

/// Apply `target` to `live_root`, first removing the files `previous` owns.
pub fn apply_profile(
    target: &Profile,
    previous: Option<&Profile>,
    live_root: &Path,
) -> Result<ApplyReport> {
    SyncEngine::new(live_root).apply(target, previous)
}
