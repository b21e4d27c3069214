// src/shutdown.rs

//! Best-effort teardown after the control loop has terminated.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::LiverunError;
use crate::exec::Executor;
use crate::session::Session;

/// Stop the current process and remove the transient artifacts.
///
/// Runs exactly once, after a clean quit. Every step is attempted even if an
/// earlier one failed; the collected errors are returned for the caller to
/// log and never change the exit status.
pub async fn teardown<E: Executor>(executor: &mut E, session: &mut Session) -> Vec<LiverunError> {
    let mut errs = Vec::new();

    errs.extend(executor.stop().await);

    // Close the marker handle before removing the file.
    if let Some(marker) = session.take_marker() {
        drop(marker);
    }
    if session.marker_exists() {
        debug!(path = %session.marker_path, "removing marker file");
        if let Err(err) = std::fs::remove_file(&session.marker_path) {
            errs.push(LiverunError::Io(err));
        }
    }

    if Path::new(&session.artifact_path).exists() {
        debug!(path = %session.artifact_path, "removing build artifact");
        if let Err(err) = std::fs::remove_file(&session.artifact_path) {
            errs.push(LiverunError::Io(err));
        }
    }

    info!(errors = errs.len(), "teardown complete");
    errs
}
