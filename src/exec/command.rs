// src/exec/command.rs

//! The description of one external command to run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::exec::sink::{OutputSink, TracingSink};

/// Everything needed to run one external process.
///
/// A `Command` is only borrowed by [`crate::exec::execute`], so the same
/// value can be run again; every run gets fresh readers, merger and process
/// handle.
#[derive(Clone)]
pub struct Command {
    pub executable: String,
    pub args: Vec<String>,
    /// `None` runs in the caller's current directory.
    pub working_dir: Option<PathBuf>,
    /// Applied on top of the inherited environment.
    pub env: BTreeMap<String, String>,
    pub sink: Arc<dyn OutputSink>,
}

impl Command {
    /// New command with no args, inherited cwd/env, and a [`TracingSink`].
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set one environment override. A later call with the same key wins.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    pub fn sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Human-readable `executable arg1 arg2 ...`, used in logs and errors.
    pub fn label(&self) -> String {
        if self.args.is_empty() {
            self.executable.clone()
        } else {
            format!("{} {}", self.executable, self.args.join(" "))
        }
    }

    /// Build the tokio command with stdio piped for capture.
    pub(crate) fn to_tokio(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.executable);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("executable", &self.executable)
            .field("args", &self.args)
            .field("working_dir", &self.working_dir)
            .field("env", &self.env)
            .field("sink", &self.sink)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::sink::DiscardSink;

    #[test]
    fn builder_collects_args_and_env() {
        let cmd = Command::new("helm")
            .arg("install")
            .args(["--namespace", "test"])
            .env("A", "1")
            .envs([("B", "2"), ("A", "3")])
            .current_dir("/tmp")
            .sink(Arc::new(DiscardSink));

        assert_eq!(cmd.executable, "helm");
        assert_eq!(cmd.args, vec!["install", "--namespace", "test"]);
        assert_eq!(cmd.env.get("A").map(String::as_str), Some("3"));
        assert_eq!(cmd.env.get("B").map(String::as_str), Some("2"));
        assert_eq!(cmd.working_dir.as_deref(), Some(Path::new("/tmp")));
    }

    #[test]
    fn label_joins_executable_and_args() {
        assert_eq!(Command::new("ls").label(), "ls");
        assert_eq!(Command::new("echo").args(["a", "b"]).label(), "echo a b");
    }
}
