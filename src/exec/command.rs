// src/exec/command.rs

//! Real executor on top of the platform shell.

use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::errors::{LiverunError, Result};
use crate::exec::backend::{BoxFuture, Executor};
use crate::exec::process::ProcessController;
use crate::session::Session;

/// Build a shell command appropriate for the platform.
pub fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// Runs the expanded build/run commands and owns the managed process.
///
/// Both commands inherit our stdout and stderr, so their output interleaves
/// unbuffered with ours. Stdin is inherited only by the run command, and
/// only when input redirection was configured.
#[derive(Debug)]
pub struct CommandExecutor {
    build_cmd: String,
    run_cmd: String,
    redirect_input: bool,
    process: ProcessController,
}

impl CommandExecutor {
    pub fn new(session: &Session) -> Self {
        Self {
            build_cmd: session.build_cmd.clone(),
            run_cmd: session.run_cmd.clone(),
            redirect_input: session.redirect_input,
            process: ProcessController::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.process.is_running()
    }

    /// Run the build command to completion, streaming its output live.
    async fn run_build(&mut self) -> Result<()> {
        info!(cmd = %self.build_cmd, "ex. build");

        let mut cmd = shell_command(&self.build_cmd);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = cmd.status().await?;
        if !status.success() {
            return Err(LiverunError::BuildFailed(status.code().unwrap_or(-1)));
        }

        Ok(())
    }

    /// Start the run command, replacing any current process.
    async fn spawn_run(&mut self) -> Result<()> {
        info!(cmd = %self.run_cmd, "ex. run");

        let mut cmd = shell_command(&self.run_cmd);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        cmd.stdin(if self.redirect_input {
            Stdio::inherit()
        } else {
            Stdio::null()
        });

        self.process.start(cmd).await
    }
}

impl Executor for CommandExecutor {
    fn build(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.run_build())
    }

    fn start_run(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.spawn_run())
    }

    fn build_and_run(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.run_build().await?;
            self.spawn_run().await
        })
    }

    fn stop(&mut self) -> BoxFuture<'_, Vec<LiverunError>> {
        Box::pin(self.process.stop())
    }
}
