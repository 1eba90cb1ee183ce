//! Command implementations for loadout-cli

pub mod apply;
pub mod compare;
pub mod config;
pub mod list;
pub mod profile;
pub mod watch;

pub use apply::{run_apply, run_fresh_install};
pub use compare::run_compare;
pub use config::run_config;
pub use list::{run_list, run_show, run_status};
pub use profile::{run_delete, run_edit, run_new};
pub use watch::run_watch;

use dialoguer::Confirm;

use crate::error::{CliError, Result};

/// Ask the user to confirm a destructive step unless `assume_yes` is set.
///
/// A declined prompt is reported as a user error so the process exits
/// non-zero without touching anything.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<()> {
    if assume_yes {
        return Ok(());
    }

    let proceed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    if !proceed {
        return Err(CliError::user("Cancelled by user."));
    }
    Ok(())
}
