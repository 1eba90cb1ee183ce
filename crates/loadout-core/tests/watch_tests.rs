//! LiveWatcher polling

use std::sync::Arc;
use std::time::Duration;

use loadout_core::{LiveWatcher, ProfileManager};
use loadout_test_utils::TestEnv;
use tokio::time::timeout;

const INTERVAL: Duration = Duration::from_millis(20);
const WAIT: Duration = Duration::from_secs(5);

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reports_a_change_to_the_live_root() {
    let env = TestEnv::new();
    env.write_live("cfg/autoexec.cfg", "one");
    let manager = Arc::new(ProfileManager::new(env.profiles_dir(), env.live_root()));

    let (watcher, mut changes) = LiveWatcher::spawn(Arc::clone(&manager), INTERVAL);
    tokio::time::sleep(INTERVAL * 5).await;
    env.write_live("cfg/autoexec.cfg", "two");

    let change = timeout(WAIT, changes.recv())
        .await
        .expect("no change reported in time")
        .expect("watcher channel closed");

    assert_ne!(change.previous, change.current);
    assert_eq!(change.current, manager.live_snapshot());
    watcher.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn quiet_live_root_reports_nothing() {
    let env = TestEnv::new();
    env.write_live("cfg/autoexec.cfg", "one");
    let manager = Arc::new(ProfileManager::new(env.profiles_dir(), env.live_root()));

    let (watcher, mut changes) = LiveWatcher::spawn(manager, INTERVAL);
    let received = timeout(INTERVAL * 10, changes.recv()).await;

    assert!(received.is_err(), "unexpected change: {received:?}");
    watcher.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dropping_the_watcher_closes_the_channel() {
    let env = TestEnv::new();
    let manager = Arc::new(ProfileManager::new(env.profiles_dir(), env.live_root()));

    let (watcher, mut changes) = LiveWatcher::spawn(manager, INTERVAL);
    drop(watcher);

    let closed = timeout(WAIT, changes.recv()).await.expect("channel not closed");
    assert!(closed.is_none());
}
