//! List, status and show commands

use colored::Colorize;
use loadout_core::{Profile, ProfileManager};
use serde_json::json;

use crate::context::Context;
use crate::error::Result;

fn profile_json(profile: &Profile, current: bool) -> serde_json::Value {
    json!({
        "id": profile.id,
        "name": profile.metadata.name,
        "description": profile.metadata.description,
        "launch_options": profile.metadata.launch_options,
        "current": current,
    })
}

/// Run the list command
pub fn run_list(manager: &ProfileManager, json: bool) -> Result<()> {
    let profiles = manager.list_profiles()?;
    let current = manager.current_match_index(&profiles);

    if json {
        let entries: Vec<_> = profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| profile_json(profile, current == Some(index)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!(
            "{} (use {} to create one)",
            "No profiles".dimmed(),
            "loadout new".cyan()
        );
        return Ok(());
    }

    println!("{}", "Profiles".bold());
    println!();
    for (index, profile) in profiles.iter().enumerate() {
        let marker = if current == Some(index) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!("  {} {:<24} {}", marker, profile.id.cyan(), profile.name());
    }
    Ok(())
}

/// Run the status command
pub fn run_status(context: &Context, json: bool) -> Result<()> {
    let manager = context.manager()?;
    let current = manager.current_profile()?;

    if json {
        let status = json!({
            "settings": context.settings_path.display().to_string(),
            "live_root": manager.live_root().display().to_string(),
            "live_root_exists": manager.live_root().is_dir(),
            "profiles_dir": manager.store().root().display().to_string(),
            "current": current.as_ref().map(|p| p.id.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Loadout Status".bold());
    println!();
    println!("{}:     {}", "Settings".dimmed(), context.settings_path.display());
    let live_state = if manager.live_root().is_dir() {
        String::new()
    } else {
        format!(" {}", "(missing)".yellow())
    };
    println!("{}:    {}{}", "Live root".dimmed(), manager.live_root().display(), live_state);
    println!("{}:     {}", "Profiles".dimmed(), manager.store().root().display());
    match current {
        Some(profile) => println!(
            "{}:      {} ({})",
            "Current".dimmed(),
            profile.id.green(),
            profile.name()
        ),
        None => println!("{}:      {}", "Current".dimmed(), "none".yellow()),
    }
    Ok(())
}

/// Run the show command
pub fn run_show(manager: &ProfileManager, id: &str) -> Result<()> {
    let profile = manager.get_profile(id)?;
    let current = manager.is_current(id)?;

    println!("{}", profile.name().bold());
    println!();
    println!("{}:             {}", "Id".dimmed(), profile.id.cyan());
    println!("{}:           {}", "Path".dimmed(), profile.path.display());
    println!("{}:    {}", "Description".dimmed(), profile.metadata.description);
    println!("{}: {}", "Launch options".dimmed(), profile.metadata.launch_options);
    let subtrees: Vec<&str> = loadout_fs::Subtree::ALL
        .into_iter()
        .filter(|subtree| profile.has_subtree(*subtree))
        .map(|subtree| subtree.as_str())
        .collect();
    let subtrees = if subtrees.is_empty() {
        "none".to_string()
    } else {
        subtrees.join(", ")
    };
    println!("{}:       {}", "Contents".dimmed(), subtrees);
    let state = if current { "yes".green() } else { "no".normal() };
    println!("{}:        {}", "Current".dimmed(), state);
    Ok(())
}
