// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::model::{CommandFile, CommandSection, RawCommandFile};
use crate::errors::{PipemergeError, Result};

impl TryFrom<RawCommandFile> for CommandFile {
    type Error = PipemergeError;

    fn try_from(raw: RawCommandFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_command_file(&raw)?;
        Ok(CommandFile::new_unchecked(raw.command, raw.env, raw.output))
    }
}

fn validate_raw_command_file(cfg: &RawCommandFile) -> Result<()> {
    if let Some(command) = &cfg.command {
        validate_command_section(command)?;
    }
    validate_env(&cfg.env)?;
    Ok(())
}

fn validate_command_section(command: &CommandSection) -> Result<()> {
    if command.executable.trim().is_empty() {
        return Err(PipemergeError::ConfigError(
            "[command].executable must not be empty".to_string(),
        ));
    }
    if command.executable.contains('\0') || command.args.iter().any(|a| a.contains('\0')) {
        return Err(PipemergeError::ConfigError(
            "[command] executable and args must not contain NUL bytes".to_string(),
        ));
    }
    Ok(())
}

/// Check environment override names and values the OS would reject.
pub fn validate_env(env: &BTreeMap<String, String>) -> Result<()> {
    for (name, value) in env {
        if name.is_empty() {
            return Err(PipemergeError::ConfigError(
                "[env] variable names must not be empty".to_string(),
            ));
        }
        if name.contains('=') {
            return Err(PipemergeError::ConfigError(format!(
                "[env] variable name '{name}' must not contain '='"
            )));
        }
        if name.contains('\0') || value.contains('\0') {
            return Err(PipemergeError::ConfigError(format!(
                "[env] variable '{name}' must not contain NUL bytes"
            )));
        }
    }
    Ok(())
}
