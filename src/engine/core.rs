// src/engine/core.rs

//! Pure core session state machine.
//!
//! This module contains a synchronous, deterministic core that consumes
//! [`ControlEvent`]s and produces:
//! - an updated session state (running / terminated)
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from the control channel
//! - driving the executor
//! - rearming watched paths
//!
//! The core has **no** channels, no Tokio types, and does not perform any
//! IO, so it can be unit tested without processes or a filesystem.

use std::path::PathBuf;

use crate::engine::{ControlEvent, KeyAction, Origin};

/// Lifecycle of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// A build/run transition for the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Build,
    Run,
    BuildAndRun,
}

/// A transition plus the origin that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRequest {
    pub action: RunAction,
    pub origin: Origin,
}

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Hand a build/run transition to the executor.
    Dispatch(CommandRequest),
    /// Re-subscribe a watched path after its change event was handled.
    RearmWatch(PathBuf),
    /// Unrecoverable failure; the runtime surfaces this as an error.
    Abort(String),
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

/// Pure core session state.
#[derive(Debug)]
pub struct CoreSession {
    state: SessionState,
}

impl CoreSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Handle a single control event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: ControlEvent) -> CoreStep {
        if self.state == SessionState::Terminated {
            // Stragglers from listeners that have not been torn down yet.
            return CoreStep {
                commands: Vec::new(),
                keep_running: false,
            };
        }

        match event {
            ControlEvent::PathChanged { path } => CoreStep {
                // Rebuild first, then rearm the path that fired, in that
                // order.
                commands: vec![
                    CoreCommand::Dispatch(CommandRequest {
                        action: RunAction::BuildAndRun,
                        origin: Origin::Watch,
                    }),
                    CoreCommand::RearmWatch(path),
                ],
                keep_running: true,
            },
            ControlEvent::Key(KeyAction::Quit) => {
                self.state = SessionState::Terminated;
                CoreStep {
                    commands: Vec::new(),
                    keep_running: false,
                }
            }
            ControlEvent::Key(KeyAction::Build) => manual(RunAction::Build),
            ControlEvent::Key(KeyAction::Run) => manual(RunAction::Run),
            ControlEvent::Key(KeyAction::BuildAndRun) => manual(RunAction::BuildAndRun),
            ControlEvent::TerminalFailed(reason) => {
                self.state = SessionState::Terminated;
                CoreStep {
                    commands: vec![CoreCommand::Abort(reason)],
                    keep_running: false,
                }
            }
        }
    }
}

impl Default for CoreSession {
    fn default() -> Self {
        Self::new()
    }
}

/// A manual key command: dispatch one transition, keep the loop running.
fn manual(action: RunAction) -> CoreStep {
    CoreStep {
        commands: vec![CoreCommand::Dispatch(CommandRequest {
            action,
            origin: Origin::Manual,
        })],
        keep_running: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(core: &mut CoreSession, event: ControlEvent) -> CoreStep {
        core.step(event)
    }

    #[test]
    fn path_change_dispatches_build_and_run_then_rearms() {
        let mut core = CoreSession::new();
        let path = PathBuf::from("src/main.c");

        let result = step(&mut core, ControlEvent::PathChanged { path: path.clone() });

        assert!(result.keep_running);
        assert_eq!(
            result.commands,
            vec![
                CoreCommand::Dispatch(CommandRequest {
                    action: RunAction::BuildAndRun,
                    origin: Origin::Watch,
                }),
                CoreCommand::RearmWatch(path),
            ]
        );
        assert_eq!(core.state(), SessionState::Running);
    }

    #[test]
    fn manual_keys_map_to_matching_actions() {
        let mut core = CoreSession::new();

        for (key, action) in [
            (KeyAction::Build, RunAction::Build),
            (KeyAction::Run, RunAction::Run),
            (KeyAction::BuildAndRun, RunAction::BuildAndRun),
        ] {
            let result = step(&mut core, ControlEvent::Key(key));
            assert!(result.keep_running);
            assert_eq!(
                result.commands,
                vec![CoreCommand::Dispatch(CommandRequest {
                    action,
                    origin: Origin::Manual,
                })]
            );
        }
    }

    #[test]
    fn quit_terminates_without_commands() {
        let mut core = CoreSession::new();

        let result = step(&mut core, ControlEvent::Key(KeyAction::Quit));

        assert!(!result.keep_running);
        assert!(result.commands.is_empty());
        assert_eq!(core.state(), SessionState::Terminated);
    }

    #[test]
    fn events_after_termination_are_absorbed() {
        let mut core = CoreSession::new();
        step(&mut core, ControlEvent::Key(KeyAction::Quit));

        let result = step(
            &mut core,
            ControlEvent::PathChanged {
                path: PathBuf::from("late.txt"),
            },
        );

        assert!(!result.keep_running);
        assert!(result.commands.is_empty());
    }

    #[test]
    fn terminal_failure_aborts() {
        let mut core = CoreSession::new();

        let result = step(&mut core, ControlEvent::TerminalFailed("gone".into()));

        assert!(!result.keep_running);
        assert_eq!(
            result.commands,
            vec![CoreCommand::Abort("gone".to_string())]
        );
        assert_eq!(core.state(), SessionState::Terminated);
    }
}
