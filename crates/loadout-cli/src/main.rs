//! Loadout CLI
//!
//! The command-line interface for switching between saved game config
//! profiles.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::profile::NewArgs;
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = cli.command.clone() else {
        println!("{} Game config profile manager", "loadout".green().bold());
        println!();
        println!("Run {} for available commands.", "loadout --help".cyan());
        return Ok(());
    };

    let context = Context::load(&cli)?;
    execute_command(&context, command)
}

fn execute_command(context: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { json } => commands::run_list(&context.manager()?, json),
        Commands::Status { json } => commands::run_status(context, json),
        Commands::Show { id } => commands::run_show(&context.manager()?, &id),
        Commands::Apply { id, dry_run, yes } => {
            commands::run_apply(&context.manager()?, &id, dry_run, yes)
        }
        Commands::New {
            name,
            description,
            launch_options,
            from_live: _,
            cfg,
            custom,
        } => {
            let args = NewArgs {
                name,
                description,
                launch_options,
                folders: cfg.zip(custom),
            };
            commands::run_new(&context.manager()?, args)
        }
        Commands::Edit {
            id,
            name,
            description,
            launch_options,
        } => commands::run_edit(&context.manager()?, &id, name, description, launch_options),
        Commands::Delete {
            id,
            purge_live,
            yes,
        } => commands::run_delete(&context.manager()?, &id, purge_live, yes),
        Commands::Compare { id, json } => commands::run_compare(&context.manager()?, &id, json),
        Commands::FreshInstall { yes } => commands::run_fresh_install(&context.manager()?, yes),
        Commands::Watch { interval_ms } => {
            let interval = interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or_else(|| context.effective.poll_interval());
            commands::run_watch(context.manager()?, interval)
        }
        Commands::Config { action } => commands::run_config(context, action),
    }
}
