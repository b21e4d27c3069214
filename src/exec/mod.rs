// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the build and run
//! commands, using `tokio::process::Command`.
//!
//! - [`backend`] provides the `Executor` trait that the runtime drives, and
//!   which tests can replace with a fake implementation.
//! - [`command`] implements the real executor on top of the platform shell.
//! - [`process`] owns the lifecycle of the single managed run process.

pub mod backend;
pub mod command;
pub mod process;

pub use backend::{BoxFuture, Executor};
pub use command::{shell_command, CommandExecutor};
pub use process::ProcessController;
