//! Applying profiles to the live root and comparing them against it
//!
//! This module provides:
//! - **engine**: delete the previous profile's files, copy the target's,
//!   purge runtime caches
//! - **compare**: per-file differences between a profile and the live root

mod compare;
mod engine;

pub use compare::{CompareItem, CompareReport, CompareStatus, DifferenceKind, compare_profile};
pub use engine::{ApplyPhase, ApplyReport, SyncEngine, SyncOptions, apply_profile};
