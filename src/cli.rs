// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pipemerge`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pipemerge",
    version,
    about = "Run a command, stream its stdout/stderr live and print the merged output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a command file (TOML).
    ///
    /// Optional when the command is given after `--`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Working directory for the command.
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Environment override, `KEY=VALUE`. May be repeated.
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Do not log output lines while the command runs.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Print only stdout instead of the merged output.
    #[arg(long)]
    pub stdout_only: bool,

    /// Keep leading/trailing whitespace of the output.
    #[arg(long)]
    pub no_trim: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PIPEMERGE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Executable and arguments. Overrides `[command]` from `--config`.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
