// src/lib.rs

//! Run external commands and capture their stdout and stderr as one
//! chronologically merged output, streaming every line to a sink as it
//! arrives.
//!
//! ```no_run
//! # async fn demo() -> Result<(), pipemerge::errors::ExecError> {
//! use pipemerge::exec::{execute, Command};
//!
//! let out = execute(&Command::new("terraform").args(["output", "-raw", "id"])).await?;
//! println!("{}", out.trim());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{CommandFile, load_and_validate, sink_for, validate_env};
use crate::errors::ExecError;
use crate::exec::{Command, DiscardSink};

/// High-level entry point used by `main.rs`.
///
/// Builds the command from `--config` and the CLI, runs it, prints the result
/// to stdout and returns the exit code the binary should use. A command that
/// exits non-zero still has its output printed.
pub async fn run(args: CliArgs) -> Result<i32> {
    let file = match &args.config {
        Some(path) => Some(load_and_validate(path)?),
        None => None,
    };

    let (command, stdout_only, trim) = build_command(&args, file.as_ref())?;
    debug!(command = ?command, stdout_only, trim, "resolved command");

    let result = if stdout_only {
        exec::execute_stdout(&command).await
    } else {
        exec::execute(&command).await
    };

    match result {
        Ok(output) => {
            print_output(&output, trim);
            Ok(0)
        }
        Err(err @ ExecError::Exit { .. }) => {
            let code = err.exit_code().unwrap_or(1);
            print_output(err.output(), trim);
            eprintln!("pipemerge: {err}");
            Ok(code)
        }
        Err(err) => {
            print_output(err.output(), trim);
            Err(err.into())
        }
    }
}

/// Merge the command file (if any) with CLI overrides.
///
/// Returns the command plus the `stdout_only` and `trim` output settings.
fn build_command(args: &CliArgs, file: Option<&CommandFile>) -> Result<(Command, bool, bool)> {
    let mut command = match (args.command.split_first(), file) {
        (Some((exe, rest)), _) => {
            let mut command = Command::new(exe.as_str()).args(rest.iter().cloned());
            if let Some(file) = file {
                command = command
                    .envs(file.env.clone())
                    .sink(sink_for(file.output.sink));
            }
            command
        }
        (None, Some(file)) => file.to_command()?,
        (None, None) => bail!("no command given: pass one after `--` or use --config"),
    };

    let overrides: BTreeMap<String, String> = args.env.iter().cloned().collect();
    validate_env(&overrides)?;
    command = command.envs(overrides);

    if let Some(dir) = &args.working_dir {
        command = command.current_dir(dir);
    }
    if args.quiet {
        command = command.sink(Arc::new(DiscardSink));
    }

    let output = file.map(|f| f.output.clone()).unwrap_or_default();
    let stdout_only = args.stdout_only || output.stdout_only;
    let trim = output.trim && !args.no_trim;

    Ok((command, stdout_only, trim))
}

fn print_output(output: &str, trim: bool) {
    let text = if trim { output.trim() } else { output };
    if !text.is_empty() {
        println!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("pipemerge").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn trailing_command_is_used_without_config() {
        let (command, stdout_only, trim) =
            build_command(&args(&["-e", "K=V", "-C", "/tmp", "--", "echo", "x"]), None).unwrap();

        assert_eq!(command.executable, "echo");
        assert_eq!(command.args, vec!["x"]);
        assert_eq!(command.env.get("K").map(String::as_str), Some("V"));
        assert_eq!(command.working_dir, Some(std::path::PathBuf::from("/tmp")));
        assert!(!stdout_only);
        assert!(trim);
    }

    #[test]
    fn missing_command_is_an_error() {
        assert!(build_command(&args(&[]), None).is_err());
    }

    #[test]
    fn cli_env_overrides_file_env() {
        let raw: config::RawCommandFile = toml::from_str(
            r#"
[command]
executable = "env"

[env]
K = "file"
OTHER = "kept"

[output]
stdout_only = true
"#,
        )
        .unwrap();
        let file = CommandFile::try_from(raw).unwrap();

        let (command, stdout_only, _) =
            build_command(&args(&["-e", "K=cli", "--no-trim"]), Some(&file)).unwrap();

        assert_eq!(command.executable, "env");
        assert_eq!(command.env.get("K").map(String::as_str), Some("cli"));
        assert_eq!(command.env.get("OTHER").map(String::as_str), Some("kept"));
        assert!(stdout_only);
    }
}
