// src/errors.rs

//! Crate-wide error type and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiverunError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("build command exited with status {0}")]
    BuildFailed(i32),

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("stopping process: {0}")]
    StopProcess(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LiverunError>;
