// src/config/loader.rs

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::model::{CommandFile, RawCommandFile};
use crate::errors::{PipemergeError, Result};
use crate::exec::{Command, DiscardSink, OutputSink, TracingSink};
use crate::types::SinkKind;

/// Load a command file from a given path and return the raw `RawCommandFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawCommandFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawCommandFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a command file from path and validate it.
///
/// A relative `working_dir` is resolved against the file's directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<CommandFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let mut config = CommandFile::try_from(raw_config)?;

    if let Some(command) = config.command.as_mut() {
        if let Some(dir) = command.working_dir.as_ref().filter(|d| d.is_relative()) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                command.working_dir = Some(parent.join(dir));
            }
        }
    }

    Ok(config)
}

/// Build the sink selected by `kind`.
pub fn sink_for(kind: SinkKind) -> Arc<dyn OutputSink> {
    match kind {
        SinkKind::Log => Arc::new(TracingSink),
        SinkKind::Discard => Arc::new(DiscardSink),
    }
}

impl CommandFile {
    /// Build a runnable [`Command`] from `[command]`, `[env]` and `[output]`.
    ///
    /// Fails if the file has no `[command]` section.
    pub fn to_command(&self) -> Result<Command> {
        let section = self.command.as_ref().ok_or_else(|| {
            PipemergeError::ConfigError("command file has no [command] section".to_string())
        })?;

        let mut command = Command::new(&section.executable)
            .args(section.args.iter().cloned())
            .envs(self.env.clone())
            .sink(sink_for(self.output.sink));

        if let Some(dir) = &section.working_dir {
            command = command.current_dir(dir);
        }

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_full_file_into_command() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[command]
executable = "bash"
args = ["-c", "echo hi"]

[env]
GREETING = "hello"

[output]
sink = "discard"
stdout_only = true
trim = false
"#
        )
        .unwrap();

        let cfg = load_and_validate(file.path()).unwrap();
        assert!(cfg.output.stdout_only);
        assert!(!cfg.output.trim);

        let command = cfg.to_command().unwrap();
        assert_eq!(command.executable, "bash");
        assert_eq!(command.args, vec!["-c", "echo hi"]);
        assert_eq!(command.env.get("GREETING").map(String::as_str), Some("hello"));
    }

    #[test]
    fn relative_working_dir_is_resolved_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmd.toml");
        fs::write(
            &path,
            "[command]\nexecutable = \"pwd\"\nworking_dir = \"sub\"\n",
        )
        .unwrap();

        let cfg = load_and_validate(&path).unwrap();
        let command = cfg.to_command().unwrap();
        assert_eq!(command.working_dir, Some(dir.path().join("sub")));
    }

    #[test]
    fn unknown_field_is_a_toml_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[command]\nexecutable = \"ls\"\ncmd = \"ls\"\n").unwrap();

        assert!(matches!(
            load_and_validate(file.path()),
            Err(PipemergeError::TomlError(_))
        ));
    }

    #[test]
    fn missing_command_section_fails_to_build() {
        let cfg = CommandFile::try_from(RawCommandFile::default()).unwrap();
        assert!(matches!(
            cfg.to_command(),
            Err(PipemergeError::ConfigError(_))
        ));
    }
}
