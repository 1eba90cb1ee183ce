//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Loadout - Switch between saved game config profiles
#[derive(Parser, Debug)]
#[command(name = "loadout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Game directory holding the live cfg/ and custom/
    #[arg(long, global = true, env = "LOADOUT_LIVE_ROOT", value_name = "DIR")]
    pub live_root: Option<PathBuf>,

    /// Directory holding the stored profiles
    #[arg(long, global = true, env = "LOADOUT_PROFILES_DIR", value_name = "DIR")]
    pub profiles_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List stored profiles, marking the current one
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the live root, profiles directory and current profile
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the metadata of one profile
    Show {
        /// Profile id
        id: String,
    },

    /// Apply a profile to the live root
    ///
    /// Removes the files of the current profile first, then copies the
    /// chosen profile and purges cache files.
    Apply {
        /// Profile id
        id: String,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Create a profile
    ///
    /// Examples:
    ///   loadout new "Comp Config" --from-live
    ///   loadout new "Downloaded" --cfg ./dl/cfg --custom ./dl/custom
    New {
        /// Display name; the id is derived from it
        name: String,

        /// Profile description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Game launch options to note with the profile
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        launch_options: String,

        /// Snapshot the live root (default when no folders are given)
        #[arg(long, conflicts_with_all = ["cfg", "custom"])]
        from_live: bool,

        /// Folder named `cfg` to copy from
        #[arg(long, requires = "custom", value_name = "DIR")]
        cfg: Option<PathBuf>,

        /// Folder named `custom` to copy from
        #[arg(long, requires = "cfg", value_name = "DIR")]
        custom: Option<PathBuf>,
    },

    /// Edit the metadata of a profile
    Edit {
        /// Profile id
        id: String,

        /// New display name (the id does not change)
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New launch options
        #[arg(short, long, allow_hyphen_values = true)]
        launch_options: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile id
        id: String,

        /// Also remove the live cfg/ and custom/ directories
        #[arg(long)]
        purge_live: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show which profile files differ in the live root
    Compare {
        /// Profile id
        id: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Delete the entire live root
    FreshInstall {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Poll the live root and report when the current profile changes
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Settings actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,

    /// Store the live root
    SetLiveRoot {
        /// Game directory holding cfg/ and custom/
        dir: PathBuf,
    },

    /// Store the profiles directory
    SetProfilesDir {
        /// Directory holding the profiles
        dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_flags() {
        let cli = Cli::try_parse_from(["loadout", "apply", "comp", "--dry-run", "-y"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Apply {
                id: "comp".into(),
                dry_run: true,
                yes: true,
            })
        );
    }

    #[test]
    fn folder_sources_come_in_pairs() {
        let result = Cli::try_parse_from(["loadout", "new", "x", "--cfg", "a/cfg"]);
        assert!(result.is_err());
    }

    #[test]
    fn from_live_conflicts_with_folders() {
        let result = Cli::try_parse_from([
            "loadout", "new", "x", "--from-live", "--cfg", "a/cfg", "--custom", "a/custom",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn launch_options_accept_leading_hyphen() {
        let cli = Cli::try_parse_from(["loadout", "new", "x", "-l", "-novid -high"]).unwrap();
        match cli.command {
            Some(Commands::New { launch_options, .. }) => assert_eq!(launch_options, "-novid -high"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
