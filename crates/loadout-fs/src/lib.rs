//! Filesystem layer for Loadout
//!
//! Provides normalized paths, atomic I/O, sorted tree walks and the content
//! fingerprints used to tell whether a live directory matches a profile.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod ignore;
pub mod io;
pub mod observer;
pub mod path;
pub mod tree;

pub use checksum::Digest;
pub use config::ConfigStore;
pub use constants::{CACHE_SUFFIX, IGNORED_FILES, METADATA_FILE, Subtree};
pub use error::{Error, Result};
pub use fingerprint::{Fingerprint, Fingerprinter, folder_fingerprint, subset_fingerprint};
pub use ignore::IgnoreSet;
pub use observer::{FingerprintEvent, FingerprintObserver, TracingObserver};
pub use path::{NormalizedPath, validate_path_identifier};
pub use tree::TreeFile;
