//! Profile create, edit and delete commands

use std::path::PathBuf;

use colored::Colorize;
use loadout_core::{NewProfile, ProfileManager, ProfileMetadata, ProfileSource};

use super::confirm;
use crate::error::Result;

/// Arguments of the new command
#[derive(Debug, Clone)]
pub struct NewArgs {
    pub name: String,
    pub description: String,
    pub launch_options: String,
    /// Explicit `cfg` and `custom` folders; the live root when absent
    pub folders: Option<(PathBuf, PathBuf)>,
}

/// Run the new command
pub fn run_new(manager: &ProfileManager, args: NewArgs) -> Result<()> {
    let metadata = ProfileMetadata::new(args.name)
        .with_description(args.description)
        .with_launch_options(args.launch_options);
    let source = match args.folders {
        Some((cfg, custom)) => ProfileSource::Folders { cfg, custom },
        None => ProfileSource::Live(manager.live_root().to_path_buf()),
    };

    let profile = manager.create_profile(NewProfile::new(metadata, source))?;
    println!(
        "{} {} ({})",
        "Created".green().bold(),
        profile.id.cyan(),
        profile.path.display()
    );
    Ok(())
}

/// Run the edit command
pub fn run_edit(
    manager: &ProfileManager,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    launch_options: Option<String>,
) -> Result<()> {
    let mut metadata = manager.get_profile(id)?.metadata;
    if let Some(name) = name {
        metadata.name = name;
    }
    if let Some(description) = description {
        metadata.description = description;
    }
    if let Some(launch_options) = launch_options {
        metadata.launch_options = launch_options;
    }

    let profile = manager.edit_profile_metadata(id, metadata)?;
    println!("{} {}", "Updated".green().bold(), profile.id.cyan());
    Ok(())
}

/// Run the delete command
pub fn run_delete(manager: &ProfileManager, id: &str, purge_live: bool, yes: bool) -> Result<()> {
    let profile = manager.get_profile(id)?;
    let prompt = if purge_live {
        format!(
            "Delete profile '{}' and the live cfg/ and custom/ folders?",
            profile.id
        )
    } else {
        format!("Delete profile '{}'?", profile.id)
    };
    confirm(&prompt, yes)?;

    manager.delete_profile(id, purge_live)?;
    println!("{} {}", "Deleted".green().bold(), profile.id.cyan());
    if purge_live {
        println!("  {} live cfg/ and custom/", "-".red());
    }
    Ok(())
}
