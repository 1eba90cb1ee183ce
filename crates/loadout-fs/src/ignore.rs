//! Filenames excluded from profile comparison

use std::collections::BTreeSet;

use crate::constants::IGNORED_FILES;

/// A set of filenames skipped by subset fingerprinting.
///
/// Matching is by exact file name at any depth; directory components of a
/// path are never consulted. The default set is [`IGNORED_FILES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    /// A set that ignores nothing.
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Whether `file_name` is ignored.
    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self {
            names: IGNORED_FILES.iter().map(|name| name.to_string()).collect(),
        }
    }
}
