use std::sync::{Arc, Mutex};

use pipemerge::exec::OutputSink;
use pipemerge::types::{Chunk, StreamTag};

/// A sink that remembers every chunk it was given and how often the run was
/// finished.
///
/// Cloning shares the underlying storage, so a test can keep one clone and
/// hand the other to a `Command`.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    chunks: Arc<Mutex<Vec<(String, Chunk)>>>,
    finished: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks in the order the sink received them.
    pub fn chunks(&self) -> Vec<Chunk> {
        self.chunks
            .lock()
            .unwrap()
            .iter()
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// Text of all chunks from `stream`, in order.
    pub fn lines_from(&self, stream: StreamTag) -> Vec<String> {
        self.chunks()
            .into_iter()
            .filter(|c| c.stream == stream)
            .map(|c| c.text)
            .collect()
    }

    /// Command labels seen with each chunk.
    pub fn labels(&self) -> Vec<String> {
        self.chunks
            .lock()
            .unwrap()
            .iter()
            .map(|(l, _)| l.clone())
            .collect()
    }

    /// Labels passed to `on_finish`, one entry per finished run.
    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

impl OutputSink for RecordingSink {
    fn on_chunk(&self, command: &str, chunk: &Chunk) {
        let mut guard = self.chunks.lock().unwrap();
        guard.push((command.to_string(), chunk.clone()));
    }

    fn on_finish(&self, command: &str) {
        self.finished.lock().unwrap().push(command.to_string());
    }
}
