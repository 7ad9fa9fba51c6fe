// src/exec/supervisor.rs

//! Spawn a child, drive its readers and the merger, and map the exit status.

use std::time::Instant;

use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::ExecError;
use crate::exec::accumulator::CapturedOutput;
use crate::exec::command::Command;
use crate::exec::line_reader::{ReaderEvent, read_lines};
use crate::exec::merger::{CHANNEL_CAPACITY, merge};
use crate::exec::sink::OutputSink;
use crate::types::StreamTag;

/// Run `command` and return stdout and stderr merged in arrival order.
///
/// Every line is handed to the command's sink while the process runs. On a
/// zero exit status the merged output is returned; a non-zero status becomes
/// [`ExecError::Exit`], which still carries the full output.
///
/// Output is decoded as UTF-8 line by line; invalid sequences are replaced
/// with U+FFFD rather than failing the run.
///
/// There is no timeout here. Wrap the call in `tokio::time::timeout` if you
/// need one; dropping the future kills the child.
pub async fn execute(command: &Command) -> Result<String, ExecError> {
    run(command).await.map(|out| out.merged)
}

/// Like [`execute`], but on success return only the stdout lines.
///
/// Errors still carry the merged output of both streams.
pub async fn execute_stdout(command: &Command) -> Result<String, ExecError> {
    run(command).await.map(|out| out.stdout)
}

/// Run `command` for its side effects only.
pub async fn run_command(command: &Command) -> Result<(), ExecError> {
    run(command).await.map(|_| ())
}

/// Shared implementation behind the public entry points.
pub async fn run(command: &Command) -> Result<CapturedOutput, ExecError> {
    let label = command.label();
    let started = Instant::now();

    info!(
        command = %label,
        cwd = ?command.working_dir,
        env_overrides = command.env.len(),
        "running command"
    );

    let mut child = command.to_tokio().spawn().map_err(|source| ExecError::Launch {
        command: label.clone(),
        source,
    })?;

    let output = match drain_streams(child.stdout.take(), child.stderr.take(), &label, &*command.sink).await {
        Ok(output) => output,
        Err(err) => {
            // Stop the child before reporting the broken stream.
            if let Err(e) = child.start_kill() {
                debug!(command = %label, error = %e, "child already gone");
            }
            if let Err(e) = child.wait().await {
                debug!(command = %label, error = %e, "failed to reap child after stream error");
            }
            return Err(err);
        }
    };

    let status = match child.wait().await {
        Ok(status) => status,
        Err(source) => {
            return Err(ExecError::Wait {
                command: label,
                output: output.merged,
                source,
            });
        }
    };

    let code = status.code().unwrap_or(-1);
    info!(
        command = %label,
        exit_code = code,
        success = status.success(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "command exited"
    );

    if status.success() {
        Ok(output)
    } else {
        Err(ExecError::Exit {
            command: label,
            code,
            output: output.merged,
        })
    }
}

/// Read both streams to the end, merging them through the command's sink.
///
/// Returns once both readers have finished. On the first read failure the
/// remaining readers are aborted and [`ExecError::Stream`] carries whatever
/// was merged up to that point.
pub(crate) async fn drain_streams<O, E>(
    stdout: Option<O>,
    stderr: Option<E>,
    label: &str,
    sink: &dyn OutputSink,
) -> Result<CapturedOutput, ExecError>
where
    O: AsyncRead + Unpin + Send + 'static,
    E: AsyncRead + Unpin + Send + 'static,
{
    // Readers are owned by the set; dropping it on any return path aborts
    // whichever of them is still running.
    let mut readers = JoinSet::new();
    let rx = spawn_readers(stdout, stderr, &mut readers);

    let outcome = merge(rx, label, sink).await;

    if let Some((stream, source)) = outcome.failure {
        readers.shutdown().await;
        return Err(ExecError::Stream {
            command: label.to_string(),
            stream,
            output: outcome.output.merged,
            source,
        });
    }

    while readers.join_next().await.is_some() {}
    Ok(outcome.output)
}

/// Start one reader per pipe.
///
/// The returned receiver closes once both readers have finished. The
/// original sender is dropped here so it cannot keep the channel open.
fn spawn_readers<O, E>(
    stdout: Option<O>,
    stderr: Option<E>,
    readers: &mut JoinSet<()>,
) -> mpsc::Receiver<ReaderEvent>
where
    O: AsyncRead + Unpin + Send + 'static,
    E: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<ReaderEvent>(CHANNEL_CAPACITY);

    match stdout {
        Some(stdout) => {
            readers.spawn(read_lines(stdout, StreamTag::Stdout, tx.clone()));
        }
        None => warn!("stdout pipe not available"),
    }

    match stderr {
        Some(stderr) => {
            readers.spawn(read_lines(stderr, StreamTag::Stderr, tx.clone()));
        }
        None => warn!("stderr pipe not available"),
    }

    drop(tx);
    rx
}
