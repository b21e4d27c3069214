// src/term/mod.rs

//! Terminal control surface.
//!
//! This is the only module that knows about `crossterm`. The surface is an
//! RAII guard owned by `run()`, so raw mode is released on every exit path;
//! the key listener is a background task that maps keystrokes to control
//! events and submits them instead of acting on the process directly.
//!
//! Key map:
//! - F5     : resynchronise the screen
//! - Ctrl-Q : quit
//! - Ctrl-B : build
//! - Ctrl-R : run
//! - Ctrl-A : build & run

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::{ControlEvent, KeyAction};

/// Raw-mode guard for the terminal surface.
///
/// Created once at startup; restores the terminal when dropped, whichever
/// way the session ends.
#[derive(Debug)]
pub struct Surface {
    _private: (),
}

impl Surface {
    /// Enable raw mode and clear the screen. Failure here is fatal: the
    /// session cannot run without its control surface.
    pub fn init() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling terminal raw mode")?;
        clear_screen().context("clearing terminal")?;
        Ok(Self { _private: () })
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        // Logging may already be torn down here.
        if let Err(err) = terminal::disable_raw_mode() {
            eprintln!("liverun: failed to restore terminal: {err}");
        }
    }
}

fn clear_screen() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    stdout.flush()
}

/// Spawn the terminal-key listener.
///
/// The listener blocks on the next input event and submits recognised
/// actions to the control channel. It ends when quit was submitted, the
/// input stream fails (fatal for the session), or the runtime goes away.
pub fn spawn_key_listener(control_tx: mpsc::Sender<ControlEvent>) {
    tokio::spawn(async move {
        let mut events = EventStream::new();

        while let Some(item) = events.next().await {
            let event = match item {
                Ok(event) => event,
                Err(err) => {
                    let _ = control_tx
                        .send(ControlEvent::TerminalFailed(err.to_string()))
                        .await;
                    break;
                }
            };

            match key_command(&event) {
                Some(KeyCommand::Resync) => {
                    // Screen-only; never leaves the terminal task.
                    info!("screen resync");
                    if let Err(err) = clear_screen() {
                        let _ = control_tx
                            .send(ControlEvent::TerminalFailed(err.to_string()))
                            .await;
                        break;
                    }
                }
                Some(KeyCommand::Submit(action)) => {
                    let quit = action == KeyAction::Quit;
                    if control_tx.send(ControlEvent::Key(action)).await.is_err() {
                        break;
                    }
                    if quit {
                        break;
                    }
                }
                None => debug!(?event, "ignoring terminal event"),
            }
        }

        debug!("terminal-key listener finished");
    });
}

/// What a terminal event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCommand {
    /// Redraw the screen in place.
    Resync,
    /// Forward an action to the runtime.
    Submit(KeyAction),
}

fn key_command(event: &Event) -> Option<KeyCommand> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };
    if *kind != KeyEventKind::Press {
        return None;
    }

    match (code, *modifiers) {
        (KeyCode::F(5), _) => Some(KeyCommand::Resync),
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(KeyCommand::Submit(KeyAction::Quit)),
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Some(KeyCommand::Submit(KeyAction::Build)),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(KeyCommand::Submit(KeyAction::Run)),
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
            Some(KeyCommand::Submit(KeyAction::BuildAndRun))
        }
        _ => None,
    }
}
