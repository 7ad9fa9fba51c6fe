// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::SinkKind;

/// Command file as read from TOML, before validation.
///
/// ```toml
/// [command]
/// executable = "bash"
/// args = ["-c", "echo hi"]
/// working_dir = "."
///
/// [env]
/// FOO = "bar"
///
/// [output]
/// sink = "log"
/// stdout_only = false
/// trim = true
/// ```
///
/// `[command]` may be left out when the command is supplied on the CLI.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawCommandFile {
    #[serde(default)]
    pub command: Option<CommandSection>,

    /// Environment overrides. TOML keys are unique, so each name appears once.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default)]
    pub output: OutputSection,
}

/// `[command]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSection {
    pub executable: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Relative paths are resolved against the command file's directory.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub sink: SinkKind,

    /// Return only stdout instead of the merged output.
    #[serde(default)]
    pub stdout_only: bool,

    /// Trim leading/trailing whitespace of the final output.
    #[serde(default = "default_trim")]
    pub trim: bool,
}

fn default_trim() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            sink: SinkKind::default(),
            stdout_only: false,
            trim: default_trim(),
        }
    }
}

/// A validated command file.
///
/// Only constructed through `TryFrom<RawCommandFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct CommandFile {
    pub command: Option<CommandSection>,
    pub env: BTreeMap<String, String>,
    pub output: OutputSection,
}

impl CommandFile {
    pub(crate) fn new_unchecked(
        command: Option<CommandSection>,
        env: BTreeMap<String, String>,
        output: OutputSection,
    ) -> Self {
        Self {
            command,
            env,
            output,
        }
    }
}
