//! Compare command implementation

use colored::Colorize;
use loadout_core::{CompareStatus, DifferenceKind, ProfileManager};

use crate::error::Result;

/// Run the compare command
pub fn run_compare(manager: &ProfileManager, id: &str, json: bool) -> Result<()> {
    let report = manager.compare(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let status = match report.status {
        CompareStatus::InSync => "in sync".green(),
        CompareStatus::Missing => "missing files".yellow(),
        CompareStatus::Modified => "modified".red(),
    };
    println!("{} {}: {}", "Profile".bold(), report.profile.cyan(), status);

    for item in &report.items {
        let kind = match item.kind {
            DifferenceKind::Missing => "missing ".yellow(),
            DifferenceKind::Modified => "modified".red(),
        };
        println!("  {} {}", kind, item.path);
    }
    Ok(())
}
