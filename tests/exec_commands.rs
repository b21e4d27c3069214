// tests/exec_commands.rs

//! Real-command tests for the executor, using the platform shell.

use std::error::Error;

use liverun::errors::LiverunError;
use liverun::exec::{CommandExecutor, Executor};
use liverun::session::Session;
use liverun_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn session(build: &str, run: &str) -> Session {
    Session::new(build, run, false, Vec::new(), "./.liverun", "./_liverun.bin")
}

#[tokio::test]
async fn build_failure_short_circuits_the_run_step() -> TestResult {
    init_tracing();

    let session = session("exit 7", "echo run");
    let mut executor = CommandExecutor::new(&session);

    let err = with_timeout(executor.build_and_run()).await.unwrap_err();

    assert!(matches!(err, LiverunError::BuildFailed(7)));
    assert!(!executor.is_running(), "run step must not have started");
    Ok(())
}

#[tokio::test]
async fn successful_build_starts_the_run_command() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("OUT");

    // One build execution, one run execution.
    let session = session(&format!("echo build > {}", out.display()), "echo run");
    let mut executor = CommandExecutor::new(&session);

    with_timeout(executor.build_and_run()).await?;

    assert!(executor.is_running());
    assert_eq!(std::fs::read_to_string(&out)?.trim(), "build");

    let errs = with_timeout(executor.stop()).await;
    assert!(errs.is_empty(), "unexpected stop errors: {errs:?}");
    assert!(!executor.is_running());
    Ok(())
}

#[tokio::test]
async fn build_alone_does_not_start_a_process() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("OUT");

    let session = session(&format!("echo build > {}", out.display()), "echo run");
    let mut executor = CommandExecutor::new(&session);

    with_timeout(executor.build()).await?;

    assert!(out.exists());
    assert!(!executor.is_running());
    Ok(())
}

#[tokio::test]
async fn template_placeholder_reaches_the_shell() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let artifact = dir.path().join("artifact.bin");
    let artifact_str = artifact.display().to_string();

    let session = Session::new(
        "echo built > $1",
        "echo run",
        false,
        Vec::new(),
        "./.liverun",
        &artifact_str,
    );
    let mut executor = CommandExecutor::new(&session);

    with_timeout(executor.build()).await?;

    assert_eq!(std::fs::read_to_string(&artifact)?.trim(), "built");
    Ok(())
}
