//! Shared test utilities for the Loadout workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::TestTree`], a scratch directory with file helpers
//! - [`env`]: [`env::TestEnv`], a live root plus a profiles root side by side

pub mod env;
pub mod tree;

pub use env::TestEnv;
pub use tree::TestTree;
