// src/errors.rs

//! Crate-wide error types.
//!
//! [`ExecError`] is what a single command execution reports. Every variant
//! that happens after the process started keeps the output merged so far, so
//! a failing command's diagnostics are never dropped.
//!
//! [`PipemergeError`] wraps everything else (config files, IO at the edges).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    /// The process never started (missing binary, permissions, bad cwd).
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// One of the output streams could not be read to completion.
    #[error("failed reading {stream} of `{command}`: {source}")]
    Stream {
        command: String,
        stream: crate::types::StreamTag,
        output: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed after its streams were drained.
    #[error("failed waiting for `{command}` to exit: {source}")]
    Wait {
        command: String,
        output: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran to completion and exited non-zero.
    ///
    /// `code` is `-1` when the process was terminated by a signal.
    #[error("`{command}` exited with code {code}")]
    Exit {
        command: String,
        code: i32,
        output: String,
    },
}

impl ExecError {
    /// Exit code of the process, if it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::Exit { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Output merged before the failure. Empty for launch failures.
    pub fn output(&self) -> &str {
        match self {
            ExecError::Launch { .. } => "",
            ExecError::Stream { output, .. }
            | ExecError::Wait { output, .. }
            | ExecError::Exit { output, .. } => output,
        }
    }

    /// Consume the error and keep only the captured output.
    pub fn into_output(self) -> String {
        match self {
            ExecError::Launch { .. } => String::new(),
            ExecError::Stream { output, .. }
            | ExecError::Wait { output, .. }
            | ExecError::Exit { output, .. } => output,
        }
    }

    pub fn command(&self) -> &str {
        match self {
            ExecError::Launch { command, .. }
            | ExecError::Stream { command, .. }
            | ExecError::Wait { command, .. }
            | ExecError::Exit { command, .. } => command,
        }
    }
}

#[derive(Error, Debug)]
pub enum PipemergeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipemergeError>;
