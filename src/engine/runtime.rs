// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::engine::core::{CommandRequest, CoreCommand, CoreSession, RunAction};
use crate::engine::{ControlEvent, Origin};
use crate::errors::{LiverunError, Result};
use crate::exec::Executor;
use crate::watch::WatchControl;

/// Drives the session state machine in response to [`ControlEvent`]s, and
/// delegates build/run transitions to an [`Executor`].
///
/// This is an IO shell around [`CoreSession`], which contains the session
/// semantics. Transitions are executed inline, one event at a time, so a
/// change event and a manual key command can never overlap. The trade-off is
/// that a hanging build blocks the whole loop; there is no timeout on build
/// commands.
pub struct Runtime<E: Executor, W: WatchControl> {
    core: CoreSession,
    event_rx: mpsc::Receiver<ControlEvent>,
    executor: E,
    watch: W,
}

impl<E: Executor, W: WatchControl> fmt::Debug for Runtime<E, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<E: Executor, W: WatchControl> Runtime<E, W> {
    pub fn new(
        core: CoreSession,
        event_rx: mpsc::Receiver<ControlEvent>,
        executor: E,
        watch: W,
    ) -> Self {
        Self {
            core,
            event_rx,
            executor,
            watch,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes [`ControlEvent`]s from the control channel.
    /// - Feeds them into the pure core.
    /// - Executes the commands returned by the core.
    ///
    /// Returns the executor on a clean quit so the shutdown sequencer can
    /// stop the current process. A fatal error (manual command failure,
    /// terminal failure) is returned as `Err` instead, and no teardown runs.
    pub async fn run(mut self) -> Result<E> {
        info!("liverun runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("control channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("session terminated; stopping runtime");
                break;
            }
        }

        Ok(self.executor)
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::Dispatch(request) => self.dispatch(request).await,
            CoreCommand::RearmWatch(path) => {
                if let Err(err) = self.watch.rearm(&path) {
                    // The path may be gone; the watch set degrades rather
                    // than ending the session.
                    warn!(?path, error = %err, "failed to rearm watch");
                }
                Ok(())
            }
            CoreCommand::Abort(reason) => {
                error!(%reason, "terminal failure");
                Err(LiverunError::Terminal(reason))
            }
        }
    }

    /// Run a single build/run transition.
    ///
    /// A manual failure ends the session; a watch-triggered failure is
    /// logged and the loop keeps going, so one bad edit cannot kill a
    /// long-running watch session.
    async fn dispatch(&mut self, request: CommandRequest) -> Result<()> {
        let result = match request.action {
            RunAction::Build => self.executor.build().await,
            RunAction::Run => self.executor.start_run().await,
            RunAction::BuildAndRun => self.executor.build_and_run().await,
        };

        match result {
            Ok(()) => Ok(()),
            Err(err) => match request.origin {
                Origin::Manual => {
                    error!(action = ?request.action, error = %err, "manual command failed");
                    Err(err)
                }
                Origin::Watch => {
                    error!(
                        action = ?request.action,
                        error = %err,
                        "rebuild after change failed; still watching"
                    );
                    Ok(())
                }
            },
        }
    }
}
