// src/engine/mod.rs

//! Orchestration engine for liverun.
//!
//! This module ties together:
//! - the pure core state machine that turns control events into commands
//! - the main runtime event loop that reacts to:
//!   - file-watch change events
//!   - terminal key commands
//!   - terminal failures and quit requests
//!
//! The pure core lives in [`core`]; the async/IO shell is implemented in
//! [`runtime`]. Every listener submits [`ControlEvent`]s into one channel;
//! the runtime loop is the only place build/run transitions happen, so two
//! triggers can never interleave their build and start steps.

use std::path::PathBuf;

/// Where a build/run request came from.
///
/// Decides the failure policy: a manual request is explicit operator intent
/// and its failure ends the session; a watch-triggered request only logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Manual,
    Watch,
}

/// Operator actions recognised by the terminal-key listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Build,
    Run,
    BuildAndRun,
}

/// Events flowing into the runtime from the listeners.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// A watched path changed on disk.
    PathChanged { path: PathBuf },
    /// The operator pressed a recognised key.
    Key(KeyAction),
    /// The terminal input stream failed. Always fatal.
    TerminalFailed(String),
}

pub mod core;
pub mod runtime;

pub use core::{CommandRequest, CoreCommand, CoreSession, CoreStep, RunAction, SessionState};
pub use runtime::Runtime;
