// src/exec/line_reader.rs

//! Reassemble one child stream into lines and push them to the merger.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::types::StreamTag;

/// What a reader pushes into the shared channel.
#[derive(Debug)]
pub(crate) enum ReaderEvent {
    Line { stream: StreamTag, text: String },
    Failed { stream: StreamTag, error: std::io::Error },
}

/// Read one line into `buf`, growing it as needed.
///
/// Returns `Ok(None)` at end-of-stream. The `\n` terminator is stripped; a
/// final fragment without a terminator is returned as-is. Invalid UTF-8 is
/// replaced with U+FFFD.
///
/// On error, whatever was read before the failure is left in `buf`.
pub(crate) async fn next_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let n = reader.read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Drain `stream` line by line into `tx` until end-of-stream.
///
/// The reader never waits for the merger beyond the channel's own
/// back-pressure, and it returns as soon as its stream ends. A read failure is
/// pushed as [`ReaderEvent::Failed`] and ends the reader; bytes of the line
/// that was in progress are pushed as a final line first. If the merger has
/// already gone away the reader stops quietly.
pub(crate) async fn read_lines<R>(stream: R, tag: StreamTag, tx: mpsc::Sender<ReaderEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut lines = 0usize;

    loop {
        match next_line(&mut reader, &mut buf).await {
            Ok(Some(text)) => {
                lines += 1;
                trace!(stream = %tag, len = text.len(), "line read");
                if tx.send(ReaderEvent::Line { stream: tag, text }).await.is_err() {
                    debug!(stream = %tag, "merger closed; stopping reader");
                    return;
                }
            }
            Ok(None) => {
                debug!(stream = %tag, lines, "end of stream");
                return;
            }
            Err(error) => {
                if !buf.is_empty() {
                    let text = String::from_utf8_lossy(&buf).into_owned();
                    if tx.send(ReaderEvent::Line { stream: tag, text }).await.is_err() {
                        return;
                    }
                }
                let _ = tx.send(ReaderEvent::Failed { stream: tag, error }).await;
                return;
            }
        }
    }
}

/// A stream whose every read fails.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingRead;

#[cfg(test)]
impl AsyncRead for FailingRead {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        _buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        std::task::Poll::Ready(Err(std::io::Error::other("boom")))
    }
}
