// src/lib.rs

pub mod cli;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod session;
pub mod shutdown;
pub mod term;
pub mod watch;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::engine::{ControlEvent, CoreSession, Runtime};
use crate::exec::CommandExecutor;
use crate::session::Session;
use crate::term::Surface;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - session configuration (templates expanded, watch set parsed)
/// - the file watcher and its background listeners
/// - the terminal surface and key listener
/// - the serialized runtime loop
/// - the shutdown sequencer
pub async fn run(args: CliArgs) -> Result<()> {
    let mut session = Session::from_args(&args);
    session.ensure_marker()?;

    // Control channel: every listener submits requests here; one loop
    // consumes them, so build/run transitions never interleave.
    let (control_tx, control_rx) = mpsc::channel::<ControlEvent>(64);

    let watch = watch::spawn_watcher(&session.watch_set, control_tx.clone())?;

    // Raw mode is held by this guard for the whole session and released on
    // every return path, including fatal ones.
    let _surface = Surface::init()?;
    term::spawn_key_listener(control_tx);

    info!(
        build = %session.build_cmd,
        run = %session.run_cmd,
        "session ready"
    );

    let executor = CommandExecutor::new(&session);
    let runtime = Runtime::new(CoreSession::new(), control_rx, executor, watch);

    // A fatal error propagates from here and skips artifact cleanup.
    let mut executor = runtime.run().await?;

    let errs = shutdown::teardown(&mut executor, &mut session).await;
    if !errs.is_empty() {
        warn!("some errors occurred during shutdown");
        for err in &errs {
            warn!(error = %err, "teardown step failed");
        }
    }

    Ok(())
}
