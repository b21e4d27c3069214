use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use liverun::errors::{LiverunError, Result};
use liverun::exec::{BoxFuture, Executor};
use liverun::watch::WatchControl;

/// A fake executor that records every build/run transition instead of
/// spawning processes.
///
/// Failures can be injected per operation kind to exercise the runtime's
/// fatal/recoverable split without real commands.
#[derive(Debug)]
pub struct FakeExecutor {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_builds: bool,
    pub fail_runs: bool,
    pub fail_stop: bool,
}

impl FakeExecutor {
    pub fn new(calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            calls,
            fail_builds: false,
            fail_runs: false,
            fail_stop: false,
        }
    }

    fn record(&self, what: &str) {
        self.calls.lock().unwrap().push(what.to_string());
    }
}

impl Executor for FakeExecutor {
    fn build(&mut self) -> BoxFuture<'_, Result<()>> {
        self.record("build");
        let fail = self.fail_builds;
        Box::pin(async move {
            if fail {
                Err(LiverunError::BuildFailed(1))
            } else {
                Ok(())
            }
        })
    }

    fn start_run(&mut self) -> BoxFuture<'_, Result<()>> {
        self.record("run");
        let fail = self.fail_runs;
        Box::pin(async move {
            if fail {
                Err(LiverunError::Io(io::Error::other("fake run failure")))
            } else {
                Ok(())
            }
        })
    }

    fn build_and_run(&mut self) -> BoxFuture<'_, Result<()>> {
        self.record("build_and_run");
        let fail = self.fail_builds || self.fail_runs;
        Box::pin(async move {
            if fail {
                Err(LiverunError::BuildFailed(1))
            } else {
                Ok(())
            }
        })
    }

    fn stop(&mut self) -> BoxFuture<'_, Vec<LiverunError>> {
        self.record("stop");
        let fail = self.fail_stop;
        Box::pin(async move {
            if fail {
                vec![LiverunError::StopProcess("fake stop failure".to_string())]
            } else {
                Vec::new()
            }
        })
    }
}

/// Records rearm requests instead of touching a real watcher.
pub struct FakeWatchControl {
    pub rearmed: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeWatchControl {
    pub fn new(rearmed: Arc<Mutex<Vec<PathBuf>>>) -> Self {
        Self { rearmed }
    }
}

impl WatchControl for FakeWatchControl {
    fn rearm(&mut self, path: &Path) -> anyhow::Result<()> {
        self.rearmed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
