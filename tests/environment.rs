mod common;
use crate::common::builders::quiet_bash;
use crate::common::{TestResult, with_timeout};

use pipemerge::exec::execute;

#[tokio::test]
async fn env_overrides_are_visible_to_child() -> TestResult {
    let cmd = quiet_bash("echo \"$PIPEMERGE_A-$PIPEMERGE_B\"")
        .env("PIPEMERGE_A", "one")
        .env("PIPEMERGE_B", "two");

    let out = with_timeout(execute(&cmd)).await?;

    assert_eq!(out, "one-two");
    Ok(())
}

#[tokio::test]
async fn ambient_environment_is_inherited() -> TestResult {
    let cmd = quiet_bash("test -n \"$PATH\" && echo has-path").env("PIPEMERGE_EXTRA", "1");

    let out = with_timeout(execute(&cmd)).await?;

    assert_eq!(out, "has-path");
    Ok(())
}

#[tokio::test]
async fn override_replaces_inherited_value() -> TestResult {
    let cmd = quiet_bash("echo \"$HOME\"").env("HOME", "/pipemerge/home");

    let out = with_timeout(execute(&cmd)).await?;

    assert_eq!(out, "/pipemerge/home");
    Ok(())
}

#[tokio::test]
async fn working_dir_is_applied() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("marker.txt"), "here")?;

    let cmd = quiet_bash("cat marker.txt; echo; pwd -P").current_dir(dir.path());
    let out = with_timeout(execute(&cmd)).await?;

    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("here"));
    let pwd = std::path::PathBuf::from(lines.next().unwrap_or_default());
    assert_eq!(pwd, dir.path().canonicalize()?);
    Ok(())
}
