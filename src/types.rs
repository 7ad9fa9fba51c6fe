// src/types.rs

use std::fmt;

use serde::Deserialize;

/// Which of the child's two output streams a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamTag {
    Stdout,
    Stderr,
}

impl StreamTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamTag::Stdout => "stdout",
            StreamTag::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reassembled line from a single stream.
///
/// `text` never includes the trailing `\n` terminator. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD, so `text` is lossy for binary
/// output. `seq` is the position at which the merger observed the chunk,
/// starting at 0 for every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub stream: StreamTag,
    pub seq: u64,
}

/// What the CLI and config file do with each chunk as it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Log every chunk through `tracing` (default).
    Log,
    /// Drop chunks; only the accumulated output is kept.
    Discard,
}

impl Default for SinkKind {
    fn default() -> Self {
        SinkKind::Log
    }
}
