//! Profile storage
//!
//! Each profile is a directory under the profiles root holding optional
//! `cfg/` and `custom/` snapshots and a `profile.json` metadata record.

mod profile;
mod profile_store;

pub use profile::{Profile, ProfileMetadata, profile_id};
pub use profile_store::{NewProfile, ProfileSource, ProfileStore};
