mod common;
use crate::common::builders::{bash, quiet_bash};
use crate::common::{RecordingSink, TestResult, init_tracing, with_timeout};

use std::sync::Arc;

use pipemerge::errors::ExecError;
use pipemerge::exec::{Command, execute, execute_stdout, run_command};

#[tokio::test]
async fn non_zero_exit_returns_code_and_output() -> TestResult {
    init_tracing();

    let sink = RecordingSink::new();
    let cmd = bash("echo before; echo oops >&2; exit 7").sink(Arc::new(sink.clone()));

    let err = with_timeout(execute(&cmd)).await.unwrap_err();

    match &err {
        ExecError::Exit { code, output, .. } => {
            assert_eq!(*code, 7);
            assert!(output.contains("before"));
            assert!(output.contains("oops"));
        }
        other => panic!("expected Exit error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), Some(7));
    assert_eq!(sink.chunks().len(), 2);
    assert_eq!(sink.finished().len(), 1);
    Ok(())
}

#[tokio::test]
async fn stdout_only_error_still_carries_merged_output() -> TestResult {
    let err = with_timeout(execute_stdout(&quiet_bash("echo out; echo err >&2; exit 2")))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), Some(2));
    assert!(err.output().contains("out"));
    assert!(err.output().contains("err"));
    Ok(())
}

#[tokio::test]
async fn run_command_reports_failure() -> TestResult {
    let err = with_timeout(run_command(&quiet_bash("exit 1"))).await.unwrap_err();

    assert_eq!(err.exit_code(), Some(1));
    assert_eq!(err.output(), "");
    Ok(())
}

#[tokio::test]
async fn missing_executable_is_a_launch_error() -> TestResult {
    let sink = RecordingSink::new();
    let cmd = Command::new("pipemerge-definitely-not-installed")
        .arg("x")
        .sink(Arc::new(sink.clone()));

    let err = with_timeout(execute(&cmd)).await.unwrap_err();

    assert!(matches!(err, ExecError::Launch { .. }), "got {err:?}");
    assert_eq!(err.exit_code(), None);
    assert_eq!(err.output(), "");
    assert_eq!(err.command(), "pipemerge-definitely-not-installed x");
    assert!(sink.finished().is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_working_dir_is_a_launch_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cmd = quiet_bash("pwd").current_dir(dir.path().join("does-not-exist"));

    let err = with_timeout(execute(&cmd)).await.unwrap_err();

    assert!(matches!(err, ExecError::Launch { .. }), "got {err:?}");
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn killed_by_signal_reports_minus_one() -> TestResult {
    let err = with_timeout(execute(&quiet_bash("echo dying; kill -9 $$")))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), Some(-1));
    assert_eq!(err.output(), "dying");
    Ok(())
}
