//! Watch command implementation

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use loadout_core::{LiveWatcher, ProfileManager};

use crate::error::{CliError, Result};

fn print_current(manager: &ProfileManager) -> Result<()> {
    match manager.current_profile()? {
        Some(profile) => println!(
            "{} {} ({})",
            "Current:".bold(),
            profile.id.green(),
            profile.name()
        ),
        None => println!("{} {}", "Current:".bold(), "none".yellow()),
    }
    Ok(())
}

/// Run the watch command until interrupted
pub fn run_watch(manager: ProfileManager, interval: Duration) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(Arc::new(manager), interval))
}

async fn watch(manager: Arc<ProfileManager>, interval: Duration) -> Result<()> {
    println!(
        "Watching {} every {} ms (Ctrl-C to stop)",
        manager.live_root().display(),
        interval.as_millis()
    );
    let initial = Arc::clone(&manager);
    run_blocking(move || print_current(&initial)).await?;

    let (watcher, mut changes) = LiveWatcher::spawn(Arc::clone(&manager), interval);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            change = changes.recv() => {
                if change.is_none() {
                    break;
                }
                tracing::debug!("live root changed, re-matching");
                let polled = Arc::clone(&manager);
                run_blocking(move || print_current(&polled)).await?;
            }
        }
    }

    watcher.shutdown().await?;
    Ok(())
}

async fn run_blocking<F>(task: F) -> Result<()>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| CliError::user(format!("Background task failed: {e}")))?
}
