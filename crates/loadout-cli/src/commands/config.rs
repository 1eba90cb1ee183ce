//! Config command implementation

use std::path::Path;

use colored::Colorize;
use loadout_core::Settings;

use crate::cli::ConfigAction;
use crate::context::Context;
use crate::error::{CliError, Result};

fn absolute(dir: &Path) -> Result<std::path::PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

/// Run a config subcommand
pub fn run_config(context: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{} {}", "#".dimmed(), context.settings_path.display());
            print!("{}", toml::to_string_pretty(&context.effective)?);
            if context.effective.profiles_dir.is_none()
                && let Some(default) = Settings::default_profiles_dir()
            {
                println!("{} profiles_dir defaults to {}", "#".dimmed(), default.display());
            }
            Ok(())
        }
        ConfigAction::SetLiveRoot { dir } => {
            let dir = absolute(&dir)?;
            if !dir.is_dir() {
                return Err(CliError::user(format!(
                    "Not a directory: {}",
                    dir.display()
                )));
            }
            let mut settings = context.stored.clone();
            settings.live_root = Some(dir.clone());
            context.save(&settings)?;
            println!("{} live_root = {}", "Saved".green().bold(), dir.display());
            Ok(())
        }
        ConfigAction::SetProfilesDir { dir } => {
            let dir = absolute(&dir)?;
            let mut settings = context.stored.clone();
            settings.profiles_dir = Some(dir.clone());
            context.save(&settings)?;
            println!("{} profiles_dir = {}", "Saved".green().bold(), dir.display());
            Ok(())
        }
    }
}
