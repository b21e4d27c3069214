// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `liverun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "liverun",
    version,
    about = "Watch paths, rebuild and restart a target executable on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Comma separated paths to watch. A path may be a file, a directory,
    /// or a directory glob such as "src/*".
    ///
    /// Default: the marker file in the working directory; save it to
    /// trigger a rebuild.
    #[arg(long, value_name = "PATHS", default_value = crate::session::MARKER_PATH)]
    pub watch: String,

    /// Build command template. `$1` is replaced with the ephemeral
    /// executable path.
    #[arg(long, value_name = "CMD", default_value = "go build -o $1")]
    pub build: String,

    /// Run command template. `$1` is replaced with the ephemeral executable
    /// path.
    #[arg(long, value_name = "CMD", default_value = "$1")]
    pub run: String,

    /// Redirect stdin to the run target.
    #[arg(short = 'i', long = "stdin")]
    pub redirect_input: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LIVERUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
