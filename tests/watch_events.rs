// tests/watch_events.rs

//! Tests against a real filesystem watcher.

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use liverun::engine::ControlEvent;
use liverun::watch::{spawn_watcher, WatchControl};
use liverun_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

async fn next_change(rx: &mut mpsc::Receiver<ControlEvent>) -> ControlEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no change event within 5 seconds")
        .expect("control channel closed")
}

#[tokio::test(flavor = "multi_thread")]
async fn file_change_reaches_the_control_channel() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("watched.txt");
    std::fs::write(&file, "one")?;

    let (tx, mut rx) = mpsc::channel::<ControlEvent>(16);
    let _guard = spawn_watcher(&[file.display().to_string()], tx)?;

    // Give the backend a moment to arm before mutating the file.
    sleep(Duration::from_millis(250)).await;
    std::fs::write(&file, "two")?;

    let event = next_change(&mut rx).await;
    match event {
        ControlEvent::PathChanged { path } => {
            assert_eq!(path.file_name().unwrap(), "watched.txt");
        }
        other => panic!("unexpected control event: {other:?}"),
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn glob_entries_expand_at_registration() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("a.c");
    std::fs::write(&file, "int main;")?;

    let (tx, mut rx) = mpsc::channel::<ControlEvent>(16);
    let pattern = format!("{}/*.c", dir.path().display());
    let _guard = spawn_watcher(&[pattern], tx)?;

    sleep(Duration::from_millis(250)).await;
    std::fs::write(&file, "int main(void);")?;

    let event = next_change(&mut rx).await;
    assert!(matches!(event, ControlEvent::PathChanged { .. }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn registration_failure_is_fatal() -> TestResult {
    init_tracing();

    let (tx, _rx) = mpsc::channel::<ControlEvent>(16);
    let missing = "/nonexistent/liverun-test-path".to_string();

    assert!(spawn_watcher(&[missing], tx).is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rearm_keeps_a_live_path_watched() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("watched.txt");
    std::fs::write(&file, "one")?;

    let (tx, mut rx) = mpsc::channel::<ControlEvent>(16);
    let mut guard = spawn_watcher(&[file.display().to_string()], tx)?;

    sleep(Duration::from_millis(250)).await;
    guard.rearm(&file)?;

    sleep(Duration::from_millis(250)).await;
    std::fs::write(&file, "two")?;

    let event = next_change(&mut rx).await;
    assert!(matches!(event, ControlEvent::PathChanged { .. }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rearm_of_a_vanished_path_degrades_gracefully() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let file = dir.path().join("watched.txt");
    std::fs::write(&file, "one")?;

    let (tx, _rx) = mpsc::channel::<ControlEvent>(16);
    let mut guard = spawn_watcher(&[file.display().to_string()], tx)?;

    std::fs::remove_file(&file)?;
    // Re-subscribing a missing path fails, but only as an error value the
    // runtime logs; nothing panics and the guard stays usable.
    assert!(guard.rearm(Path::new(&file)).is_err());
    Ok(())
}
