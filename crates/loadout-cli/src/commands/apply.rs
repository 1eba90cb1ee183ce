//! Apply and fresh-install commands

use colored::Colorize;
use loadout_core::{ApplyReport, ProfileManager};

use super::confirm;
use crate::error::Result;

fn print_report(report: &ApplyReport) {
    for action in &report.actions {
        println!("  {} {}", "+".green(), action);
    }
    if report.dry_run {
        for path in &report.deleted {
            println!("    {} {}", "-".red(), path);
        }
        for path in &report.copied {
            println!("    {} {}", "+".green(), path);
        }
        for path in &report.purged {
            println!("    {} {}", "~".yellow(), path);
        }
    }
}

/// Run the apply command
pub fn run_apply(manager: &ProfileManager, id: &str, dry_run: bool, yes: bool) -> Result<()> {
    if dry_run {
        let report = manager.preview_apply(id)?;
        println!("{} {}", "Dry run for".bold(), report.profile.cyan());
        print_report(&report);
        return Ok(());
    }

    let plan = manager.plan_apply(id)?;
    if let Some(current) = plan.previous_id()
        && current != plan.target.id
    {
        confirm(
            &format!("Replace current profile '{}' with '{}'?", current, plan.target.id),
            yes,
        )?;
    }

    let report = manager.apply_planned(&plan)?;
    println!("{} {}", "Applied".green().bold(), report.profile.cyan());
    print_report(&report);
    Ok(())
}

/// Run the fresh-install command
pub fn run_fresh_install(manager: &ProfileManager, yes: bool) -> Result<()> {
    confirm(
        &format!(
            "Delete everything under {}? This cannot be undone",
            manager.live_root().display()
        ),
        yes,
    )?;

    manager.fresh_install()?;
    println!(
        "{} {}",
        "Removed".green().bold(),
        manager.live_root().display()
    );
    println!("Verify the game files to restore a clean install.");
    Ok(())
}
