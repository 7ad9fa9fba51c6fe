// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs one external command with `tokio::process::Command`, reads its
//! stdout and stderr concurrently and merges them into a single ordered
//! output.
//!
//! - [`command`] holds the [`Command`] description and its builder.
//! - [`supervisor`] spawns the child, waits for it and maps the exit status.
//! - [`line_reader`] turns one pipe into lines, without a length limit.
//! - [`merger`] is the single consumer both readers feed.
//! - [`accumulator`] collects the merged text returned to the caller.
//! - [`sink`] provides the [`OutputSink`] trait and the built-in sinks.

pub mod accumulator;
pub mod command;
pub mod line_reader;
pub mod merger;
pub mod sink;
pub mod supervisor;

pub use accumulator::{CapturedOutput, OutputAccumulator};
pub use command::Command;
pub use sink::{DiscardSink, OutputSink, TracingSink};
pub use supervisor::{execute, execute_stdout, run, run_command};
