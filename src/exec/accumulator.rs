// src/exec/accumulator.rs

//! Collects chunk text into the final returned output.

use crate::types::{Chunk, StreamTag};

/// Newline-joined buffers: one for the merged order, one per stream.
///
/// Content is kept byte-for-byte; nothing is trimmed here.
#[derive(Debug, Default)]
pub struct OutputAccumulator {
    merged: String,
    stdout: String,
    stderr: String,
    merged_lines: usize,
    stdout_lines: usize,
    stderr_lines: usize,
}

/// Final accumulated text of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Both streams, in merged arrival order.
    pub merged: String,
    pub stdout: String,
    pub stderr: String,
}

impl OutputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &Chunk) {
        append_line(&mut self.merged, &mut self.merged_lines, &chunk.text);
        match chunk.stream {
            StreamTag::Stdout => append_line(&mut self.stdout, &mut self.stdout_lines, &chunk.text),
            StreamTag::Stderr => append_line(&mut self.stderr, &mut self.stderr_lines, &chunk.text),
        }
    }

    /// Number of chunks appended so far.
    pub fn len(&self) -> usize {
        self.merged_lines
    }

    pub fn is_empty(&self) -> bool {
        self.merged_lines == 0
    }

    pub fn finish(self) -> CapturedOutput {
        CapturedOutput {
            merged: self.merged,
            stdout: self.stdout,
            stderr: self.stderr,
        }
    }
}

fn append_line(buf: &mut String, count: &mut usize, text: &str) {
    if *count > 0 {
        buf.push('\n');
    }
    buf.push_str(text);
    *count += 1;
}
