// src/exec/sink.rs

//! Live output sinks.
//!
//! The merger hands every chunk to an [`OutputSink`] in merged order, as soon
//! as it arrives. The sink is carried by the [`Command`](super::Command)
//! itself rather than looked up globally, so tests can capture or silence
//! output per run.

use std::fmt::Debug;

use tracing::{debug, info};

use crate::types::Chunk;

/// Receives chunks while a command is running.
///
/// Calls happen on the merger's task. A slow sink slows down both stream
/// readers through the bounded channel but cannot deadlock them.
pub trait OutputSink: Send + Sync + Debug {
    /// Called once per chunk, in merged order.
    fn on_chunk(&self, command: &str, chunk: &Chunk);

    /// Called once after both streams reached end-of-stream (or the run was
    /// cut short by a stream error). Nothing is delivered after this.
    fn on_finish(&self, _command: &str) {}
}

/// Default sink: log every line through `tracing` at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn on_chunk(&self, command: &str, chunk: &Chunk) {
        info!(command = %command, stream = %chunk.stream, "{}", chunk.text);
    }

    fn on_finish(&self, command: &str) {
        debug!(command = %command, "output stream closed");
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl OutputSink for DiscardSink {
    fn on_chunk(&self, _command: &str, _chunk: &Chunk) {}
}
