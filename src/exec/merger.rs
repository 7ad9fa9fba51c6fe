// src/exec/merger.rs

//! Fan-in of the two stream readers.
//!
//! Both readers push into one bounded mpsc channel and the merger is its only
//! consumer, so the merged order is exactly the order in which lines reached
//! the channel. When a stdout line and a stderr line become ready at
//! effectively the same instant, whichever reader the scheduler lets enqueue
//! first wins. That tie-break is nondeterministic and is not considered a bug;
//! the order of lines *within* one stream is always preserved.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::exec::accumulator::{CapturedOutput, OutputAccumulator};
use crate::exec::line_reader::ReaderEvent;
use crate::exec::sink::OutputSink;
use crate::types::{Chunk, StreamTag};

/// Capacity of the shared reader → merger channel.
pub(crate) const CHANNEL_CAPACITY: usize = 64;

/// Result of draining the channel.
#[derive(Debug)]
pub(crate) struct MergeOutcome {
    pub output: CapturedOutput,
    /// First read failure, if any. The merger stops at the first one.
    pub failure: Option<(StreamTag, std::io::Error)>,
}

/// Drain `rx` until every reader has dropped its sender, forwarding each line
/// to `sink` and to the accumulator.
///
/// Readers never wait on the merger except through channel capacity, and the
/// merger only waits on the channel, so there is no circular wait. On the
/// first [`ReaderEvent::Failed`] the receiver is dropped, which makes any
/// still-running reader stop on its next send.
pub(crate) async fn merge(
    mut rx: mpsc::Receiver<ReaderEvent>,
    command: &str,
    sink: &dyn OutputSink,
) -> MergeOutcome {
    let mut acc = OutputAccumulator::new();
    let mut seq: u64 = 0;
    let mut failure = None;

    while let Some(event) = rx.recv().await {
        match event {
            ReaderEvent::Line { stream, text } => {
                let chunk = Chunk { text, stream, seq };
                seq += 1;
                sink.on_chunk(command, &chunk);
                acc.push(&chunk);
            }
            ReaderEvent::Failed { stream, error } => {
                warn!(
                    command = %command,
                    stream = %stream,
                    error = %error,
                    "stream read failed; aborting merge"
                );
                failure = Some((stream, error));
                break;
            }
        }
    }

    drop(rx);
    sink.on_finish(command);
    debug!(command = %command, chunks = acc.len(), "merge finished");

    MergeOutcome {
        output: acc.finish(),
        failure,
    }
}
