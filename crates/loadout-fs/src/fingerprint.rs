//! Whole-tree and subset content fingerprints
//!
//! A fingerprint folds, for every file of a tree in sorted order, its
//! relative path and the SHA-256 of its content into one running SHA-256.
//! Hashing each file separately before folding it in means a file that
//! fails to read mid-way contributes nothing rather than a prefix.
//!
//! - [`Fingerprinter::folder`] hashes everything under a directory and is
//!   used to notice that the live root changed.
//! - [`Fingerprinter::subset`] walks a *reference* tree and hashes what a
//!   *target* tree holds at the same relative paths. Files only present in
//!   the target are never looked at.

use std::path::Path;
use std::sync::Arc;

use sha2::{Digest as _, Sha256};

use crate::checksum::{Digest, hash_file};
use crate::observer::{FingerprintEvent, FingerprintObserver};
use crate::tree::walk_files;
use crate::{IgnoreSet, NormalizedPath};

/// Separates a relative path from what follows it.
const PATH_TERMINATOR: &[u8] = b"\0";
/// Precedes the 32-byte digest of a file that was read.
const CONTENT_TAG: &[u8] = b"F";
/// Stands in for a reference file that has no counterpart in the target.
const MISSING_SENTINEL: &[u8] = b"__MISSING__";

/// Outcome of a subset fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fingerprint {
    /// The reference tree contributed no comparable files (absent, empty, or
    /// everything ignored). Not a digest of anything.
    Empty,
    /// Digest over the reference file set as observed in the target
    Digest(Digest),
}

impl Fingerprint {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Digest(digest) => Some(digest),
            Self::Empty => None,
        }
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("<empty>"),
            Self::Digest(digest) => digest.fmt(f),
        }
    }
}

/// Computes fingerprints with a fixed ignore set and an optional observer.
#[derive(Clone, Default)]
pub struct Fingerprinter {
    ignore: IgnoreSet,
    observer: Option<Arc<dyn FingerprintObserver>>,
}

impl std::fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fingerprinter")
            .field("ignore", &self.ignore)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl Fingerprinter {
    pub fn new(ignore: IgnoreSet) -> Self {
        Self {
            ignore,
            observer: None,
        }
    }

    /// Attach an observer that receives every step of subset walks.
    pub fn with_observer(mut self, observer: Arc<dyn FingerprintObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    fn emit(&self, event: FingerprintEvent<'_>) {
        if let Some(observer) = &self.observer {
            observer.on_event(event);
        }
    }

    fn content_digest(&self, path: &Path, relative: &NormalizedPath) -> Option<[u8; 32]> {
        match hash_file(path) {
            Ok(raw) => Some(raw),
            Err(error) => {
                self.emit(FingerprintEvent::Unreadable {
                    path: relative,
                    error: &error,
                });
                None
            }
        }
    }

    /// Fingerprint every file under `path`.
    ///
    /// Returns `None` when `path` does not exist. The ignore set is not
    /// applied here.
    pub fn folder(&self, path: &Path) -> Option<Digest> {
        if !path.exists() {
            return None;
        }

        let mut hasher = Sha256::new();
        for file in walk_files(path) {
            let file = match file {
                Ok(file) => file,
                Err(error) => {
                    tracing::debug!(%error, "skipping unwalkable entry");
                    continue;
                }
            };
            hasher.update(file.relative_bytes());
            hasher.update(PATH_TERMINATOR);
            if let Some(raw) = self.content_digest(&file.path, &file.relative) {
                hasher.update(CONTENT_TAG);
                hasher.update(raw);
            }
        }
        Some(Digest::from_hasher(hasher))
    }

    /// Fingerprint the files of `reference` as they appear in `target`.
    ///
    /// For each non-ignored reference file the relative path is hashed,
    /// followed by the digest of the target file at that path, or a fixed
    /// sentinel when the target has none. Returns [`Fingerprint::Empty`] if
    /// no reference file was processed.
    pub fn subset(&self, reference: &Path, target: &Path) -> Fingerprint {
        let mut hasher = Sha256::new();
        let mut processed = 0usize;

        for file in walk_files(reference) {
            let file = match file {
                Ok(file) => file,
                Err(error) => {
                    tracing::debug!(%error, "skipping unwalkable entry");
                    continue;
                }
            };
            if self.ignore.contains(file.file_name()) {
                self.emit(FingerprintEvent::Ignored {
                    path: &file.relative,
                });
                continue;
            }

            processed += 1;
            self.emit(FingerprintEvent::Checking {
                path: &file.relative,
            });
            hasher.update(file.relative_bytes());
            hasher.update(PATH_TERMINATOR);

            let target_path = file.under(target);
            if !target_path.exists() {
                self.emit(FingerprintEvent::Missing {
                    path: &file.relative,
                });
                hasher.update(MISSING_SENTINEL);
                continue;
            }

            let Some(raw) = self.content_digest(&target_path, &file.relative) else {
                continue;
            };
            hasher.update(CONTENT_TAG);
            hasher.update(raw);

            if self.observer.is_some()
                && target_path != file.path
                && hash_file(&file.path).is_ok_and(|reference_raw| reference_raw != raw)
            {
                self.emit(FingerprintEvent::Mismatch {
                    path: &file.relative,
                });
            }
        }

        if processed == 0 {
            Fingerprint::Empty
        } else {
            Fingerprint::Digest(Digest::from_hasher(hasher))
        }
    }
}

/// Fingerprint every file under `path`; `None` if it does not exist.
pub fn folder_fingerprint(path: &Path) -> Option<Digest> {
    Fingerprinter::default().folder(path)
}

/// Fingerprint `reference`'s file set as observed in `target`.
pub fn subset_fingerprint(reference: &Path, target: &Path, ignore: &IgnoreSet) -> Fingerprint {
    Fingerprinter::new(ignore.clone()).subset(reference, target)
}
