// src/session.rs

//! Session configuration and transient artifacts.
//!
//! The session is built once from the CLI arguments and owned by `run()`;
//! the executor and the shutdown sequencer borrow it. There is no ambient
//! state: everything a listener needs travels through the control channel.

use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::CliArgs;

/// Default marker file, watched when no `--watch` paths are given. Saving
/// it is the manual "trigger a rebuild" affordance.
pub const MARKER_PATH: &str = "./.liverun";

/// Ephemeral executable produced by the build command and consumed by the
/// run command. Removed at shutdown.
pub const ARTIFACT_PATH: &str = "./_liverun.bin";

/// Placeholder token replaced with [`ARTIFACT_PATH`] in both command
/// templates, once at startup.
pub const PLACEHOLDER: &str = "$1";

/// Everything the orchestrator needs for one watch session.
#[derive(Debug)]
pub struct Session {
    /// Build command with the placeholder already substituted.
    pub build_cmd: String,
    /// Run command with the placeholder already substituted.
    pub run_cmd: String,
    /// Whether the run target inherits our stdin.
    pub redirect_input: bool,
    /// Watched paths, in registration order. Duplicates are allowed.
    pub watch_set: Vec<String>,
    /// Marker file location for this session.
    pub marker_path: String,
    /// Build artifact location for this session.
    pub artifact_path: String,
    marker: Option<File>,
}

impl Session {
    pub fn from_args(args: &CliArgs) -> Self {
        Self::new(
            &args.build,
            &args.run,
            args.redirect_input,
            args.watch.split(',').map(str::to_string).collect(),
            MARKER_PATH,
            ARTIFACT_PATH,
        )
    }

    pub fn new(
        build_template: &str,
        run_template: &str,
        redirect_input: bool,
        watch_set: Vec<String>,
        marker_path: &str,
        artifact_path: &str,
    ) -> Self {
        Self {
            build_cmd: expand_template(build_template, artifact_path),
            run_cmd: expand_template(run_template, artifact_path),
            redirect_input,
            watch_set,
            marker_path: marker_path.to_string(),
            artifact_path: artifact_path.to_string(),
            marker: None,
        }
    }

    /// Create the marker file if it is among the watched paths.
    ///
    /// The handle stays open for the lifetime of the session and is closed
    /// during teardown. Must run before watch registration so the path
    /// exists when it is subscribed.
    pub fn ensure_marker(&mut self) -> Result<()> {
        if !self.watch_set.iter().any(|p| p == &self.marker_path) {
            return Ok(());
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.marker_path)
            .with_context(|| format!("creating marker file '{}'", self.marker_path))?;
        self.marker = Some(file);
        Ok(())
    }

    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    /// Hand the marker handle to the shutdown sequencer.
    pub fn take_marker(&mut self) -> Option<File> {
        self.marker.take()
    }

    pub fn marker_exists(&self) -> bool {
        Path::new(&self.marker_path).exists()
    }
}

/// Substitute every occurrence of the placeholder token.
pub fn expand_template(template: &str, artifact: &str) -> String {
    template.replace(PLACEHOLDER, artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_substituted_everywhere() {
        assert_eq!(
            expand_template("go build -o $1 && strip $1", "out.bin"),
            "go build -o out.bin && strip out.bin"
        );
    }

    #[test]
    fn templates_without_the_token_pass_through() {
        assert_eq!(expand_template("make all", "out.bin"), "make all");
    }

    #[test]
    fn watch_set_preserves_order_and_duplicates() {
        let session = Session::new(
            "$1",
            "$1",
            false,
            vec!["a".into(), "b".into(), "a".into()],
            MARKER_PATH,
            ARTIFACT_PATH,
        );

        assert_eq!(session.watch_set, vec!["a", "b", "a"]);
    }

    #[test]
    fn marker_is_created_only_when_watched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let marker = dir.path().join(".liverun");
        let marker_str = marker.display().to_string();

        let mut unwatched = Session::new(
            "$1",
            "$1",
            false,
            vec!["somewhere-else".into()],
            &marker_str,
            ARTIFACT_PATH,
        );
        unwatched.ensure_marker().expect("ensure");
        assert!(!unwatched.has_marker());
        assert!(!marker.exists());

        let mut watched = Session::new(
            "$1",
            "$1",
            false,
            vec![marker_str.clone()],
            &marker_str,
            ARTIFACT_PATH,
        );
        watched.ensure_marker().expect("ensure");
        assert!(watched.has_marker());
        assert!(marker.exists());
    }
}
