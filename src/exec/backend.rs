// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! The runtime talks to an `Executor` instead of spawning processes itself.
//! This keeps every build/run transition behind one seam while letting tests
//! swap in a fake implementation that records calls instead of running
//! commands.

use std::future::Future;
use std::pin::Pin;

use crate::errors::{LiverunError, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstracting how build/run transitions are executed.
///
/// Production code uses [`CommandExecutor`](super::CommandExecutor); tests
/// can provide their own implementation that doesn't spawn real processes.
pub trait Executor: Send {
    /// Run the build command to completion.
    fn build(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Start the run command, replacing any current process. Returns as
    /// soon as the new process is running.
    fn start_run(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Build, then start the run command. A build failure skips the run
    /// step and is returned as-is.
    fn build_and_run(&mut self) -> BoxFuture<'_, Result<()>>;

    /// Stop the current process, if any. Errors are collected, not raised;
    /// afterwards no process is current.
    fn stop(&mut self) -> BoxFuture<'_, Vec<LiverunError>>;
}
