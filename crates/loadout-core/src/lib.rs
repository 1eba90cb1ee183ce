//! Core layer for Loadout
//!
//! Loadout keeps named snapshots ("profiles") of a game's `cfg/` and
//! `custom/` directories and swaps them in and out of the live game
//! directory. This crate implements:
//!
//! - **Profile store**: CRUD over profile directories and their metadata
//! - **Matching**: which stored profile the live directory currently holds
//! - **SyncEngine**: applying a profile over the previous one
//! - **ProfileManager**: the context object hosts call into
//! - **LiveWatcher**: polling the live directory for outside changes
//!
//! # Architecture
//!
//! ```text
//!          loadout-cli
//!               |
//!         loadout-core
//!               |
//!          loadout-fs
//! ```

pub mod error;
pub mod live;
pub mod manager;
pub mod matcher;
pub mod settings;
pub mod store;
pub mod sync;
pub mod watch;

pub use error::{Error, Result};
pub use live::{LiveRoot, LiveSnapshot};
pub use manager::{ApplyPlan, ProfileManager};
pub use matcher::{current_match_index, is_current};
pub use settings::{DEFAULT_POLL_INTERVAL_MS, Settings};
pub use store::{NewProfile, Profile, ProfileMetadata, ProfileSource, ProfileStore, profile_id};
pub use sync::{
    ApplyPhase, ApplyReport, CompareItem, CompareReport, CompareStatus, DifferenceKind, SyncEngine,
    SyncOptions, apply_profile, compare_profile,
};
pub use watch::{LiveChange, LiveWatcher};
