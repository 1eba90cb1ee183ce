//! Per-file comparison of a profile against the live root
//!
//! Reports which of the profile's files are missing from, or differ in, the
//! live root. Ignored filenames are skipped, like in matching.

use std::path::Path;

use loadout_fs::checksum::hash_file;
use loadout_fs::{Fingerprinter, Subtree, tree};
use serde::{Deserialize, Serialize};

use crate::matcher::is_current;
use crate::store::Profile;

/// Overall outcome of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareStatus {
    /// The live root holds the profile
    InSync,
    /// Some profile files are absent from the live root
    Missing,
    /// Some profile files differ in the live root
    Modified,
}

/// How a single file differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Present in the profile, absent live
    Missing,
    /// Present in both with different content
    Modified,
}

/// A profile file that the live root does not hold as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareItem {
    /// Path relative to the live root, e.g. `cfg/autoexec.cfg`
    pub path: String,
    /// How the file differs
    pub kind: DifferenceKind,
}

/// Report from comparing one profile against the live root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareReport {
    /// Id of the compared profile
    pub profile: String,
    /// Overall status
    pub status: CompareStatus,
    /// Whether the profile is the current one
    pub in_sync: bool,
    /// Files that differ
    pub items: Vec<CompareItem>,
}

impl CompareReport {
    pub fn modified(&self) -> impl Iterator<Item = &CompareItem> {
        self.items
            .iter()
            .filter(|item| item.kind == DifferenceKind::Modified)
    }

    pub fn missing(&self) -> impl Iterator<Item = &CompareItem> {
        self.items
            .iter()
            .filter(|item| item.kind == DifferenceKind::Missing)
    }
}

/// Compare every non-ignored file of `profile` against `live_root`.
pub fn compare_profile(
    fingerprinter: &Fingerprinter,
    profile: &Profile,
    live_root: &Path,
) -> CompareReport {
    let mut items = Vec::new();

    for subtree in Subtree::ALL {
        let live = live_root.join(subtree);
        for file in tree::walk_files(&profile.subtree(subtree)) {
            let file = match file {
                Ok(file) => file,
                Err(error) => {
                    tracing::debug!(%error, "skipping unwalkable entry");
                    continue;
                }
            };
            if fingerprinter.ignore().contains(file.file_name()) {
                continue;
            }

            let path = format!("{}/{}", subtree.as_str(), file.relative.as_str());
            let live_path = file.under(&live);
            if !live_path.exists() {
                items.push(CompareItem {
                    path,
                    kind: DifferenceKind::Missing,
                });
                continue;
            }

            let Ok(own) = hash_file(&file.path) else {
                continue;
            };
            if hash_file(&live_path).map_or(true, |theirs| theirs != own) {
                items.push(CompareItem {
                    path,
                    kind: DifferenceKind::Modified,
                });
            }
        }
    }

    let in_sync = is_current(fingerprinter, profile, live_root);
    let status = if items.iter().any(|item| item.kind == DifferenceKind::Modified) {
        CompareStatus::Modified
    } else if !items.is_empty() {
        CompareStatus::Missing
    } else {
        CompareStatus::InSync
    };

    CompareReport {
        profile: profile.id.clone(),
        status,
        in_sync,
        items,
    }
}
