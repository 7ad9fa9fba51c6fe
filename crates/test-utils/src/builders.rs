#![allow(dead_code)]

use std::sync::Arc;

use pipemerge::exec::{Command, DiscardSink};

/// `bash -c <script>` with the default tracing sink.
pub fn bash(script: &str) -> Command {
    Command::new("bash").arg("-c").arg(script)
}

/// `bash -c <script>` that does not log its output.
pub fn quiet_bash(script: &str) -> Command {
    bash(script).sink(Arc::new(DiscardSink))
}

/// Shell snippet defining `echo_stderr` / `echo_stdout` helpers that write a
/// line and then sleep `delay` so the next write happens strictly later.
pub fn paced_echo_functions(stdout_text: &str, stderr_text: &str, delay: &str) -> String {
    format!(
        r#"
echo_stderr(){{
    (>&2 echo "{stderr_text}")
    sleep {delay}
}}
echo_stdout(){{
    echo "{stdout_text}"
    sleep {delay}
}}
"#
    )
}

/// Unique-enough marker for tests that count occurrences in output.
pub fn marker(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}_{}_{nanos}", std::process::id())
}
