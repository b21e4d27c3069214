// src/watch/watcher.rs

use std::path::Path;

use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::ControlEvent;
use crate::watch::paths::{expand_glob, is_glob};

/// Re-subscription seam between the runtime and the live watcher.
///
/// The runtime rearms a path after its change event has been handled; tests
/// can substitute an implementation that records the calls.
pub trait WatchControl: Send {
    /// Unsubscribe `path`, then subscribe it again.
    fn rearm(&mut self, path: &Path) -> Result<()>;
}

/// Keeps the underlying `RecommendedWatcher` alive and rearms paths on
/// request.
///
/// Dropping this guard stops file watching; the background listeners then
/// finish on their own once the forwarding channels close.
pub struct WatchGuard {
    watcher: RecommendedWatcher,
}

impl std::fmt::Debug for WatchGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchGuard").finish()
    }
}

impl WatchControl for WatchGuard {
    /// The notification primitive may deliver only one event per
    /// subscription (a replaced file gets a new descriptor), so the path is
    /// dropped and re-added. An event landing between the two calls is not
    /// redelivered.
    fn rearm(&mut self, path: &Path) -> Result<()> {
        if let Err(err) = self.watcher.unwatch(path) {
            debug!(?path, error = %err, "unwatch before rearm failed");
        }
        self.watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("re-subscribing {path:?}"))?;
        Ok(())
    }
}

/// Register every entry of the watch set and spawn the two background
/// listeners feeding the control channel.
///
/// Registration failure is fatal: the session cannot proceed without watch
/// capability. The change-event listener forwards one
/// [`ControlEvent::PathChanged`] per notification, regardless of the
/// operation kind; the error listener logs the notification subsystem's own
/// failures and nothing else.
pub fn spawn_watcher(
    watch_set: &[String],
    control_tx: mpsc::Sender<ControlEvent>,
) -> Result<WatchGuard> {
    // Channels from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let (err_tx, mut err_rx) = mpsc::unbounded_channel::<notify::Error>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let _ = event_tx.send(event);
            }
            Err(err) => {
                let _ = err_tx.send(err);
            }
        },
        Config::default(),
    )
    .context("creating filesystem watcher")?;

    for entry in watch_set {
        register(&mut watcher, entry)?;
    }

    info!(paths = ?watch_set, "watching paths");

    // Change-event listener: every notification, whatever its kind, becomes
    // one build-and-run request against the path that fired.
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            info!(kind = ?event.kind, paths = ?event.paths, "file event");

            let Some(path) = event.paths.first().cloned() else {
                continue;
            };
            if control_tx
                .send(ControlEvent::PathChanged { path })
                .await
                .is_err()
            {
                // Runtime is gone; nothing left to notify.
                break;
            }
        }
        debug!("change-event listener finished");
    });

    // Error listener: purely diagnostic, never ends the session.
    tokio::spawn(async move {
        while let Some(err) = err_rx.recv().await {
            warn!(error = %err, "watch subsystem error");
        }
        debug!("error listener finished");
    });

    Ok(WatchGuard { watcher })
}

fn register(watcher: &mut RecommendedWatcher, entry: &str) -> Result<()> {
    if is_glob(entry) {
        for path in expand_glob(entry)? {
            watcher
                .watch(&path, RecursiveMode::NonRecursive)
                .with_context(|| format!("subscribing {path:?} (from '{entry}')"))?;
        }
        return Ok(());
    }

    watcher
        .watch(Path::new(entry), RecursiveMode::NonRecursive)
        .with_context(|| format!("subscribing '{entry}'"))?;
    Ok(())
}
