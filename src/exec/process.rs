// src/exec/process.rs

//! Ownership of the single managed run process.

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::{LiverunError, Result};

/// Owns the lifecycle of at most one externally-running process.
///
/// Nothing else holds a live reference to the underlying OS process:
/// [`start`](Self::start) replaces the previous child before the new one
/// becomes current, and [`stop`](Self::stop) guarantees that no child is
/// current once it returns.
#[derive(Debug, Default)]
pub struct ProcessController {
    child: Option<Child>,
}

impl ProcessController {
    pub fn new() -> Self {
        Self { child: None }
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Spawn `cmd`, forcibly replacing the current process if there is one.
    ///
    /// The predecessor is terminated and reaped first; a termination failure
    /// is logged and does not block the new start. Returns as soon as the
    /// new process is running, without waiting for it to finish.
    pub async fn start(&mut self, mut cmd: Command) -> Result<()> {
        if let Some(mut previous) = self.child.take() {
            debug!(pid = ?previous.id(), "terminating previous run process");
            if let Err(err) = previous.kill().await {
                warn!(error = %err, "failed to terminate previous process");
                let _ = previous.wait().await;
            }
        }

        let child = cmd.spawn()?;
        info!(pid = ?child.id(), "run process started");
        self.child = Some(child);
        Ok(())
    }

    /// Terminate and reap the current process, blocking until it has been
    /// reaped.
    ///
    /// No-op when nothing is running. Termination errors are collected, not
    /// raised; either way no process is current afterwards.
    pub async fn stop(&mut self) -> Vec<LiverunError> {
        let mut errs = Vec::new();

        let Some(mut child) = self.child.take() else {
            return errs;
        };

        debug!(pid = ?child.id(), "stopping run process");
        if let Err(err) = child.kill().await {
            errs.push(LiverunError::StopProcess(err.to_string()));
            // The process may have exited on its own; reap it regardless.
            let _ = child.wait().await;
        }

        errs
    }
}
