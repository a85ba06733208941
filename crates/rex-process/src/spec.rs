// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process specification types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one child process invocation.
///
/// The environment of the parent is inherited; `env` entries are added on
/// top of it. Streams that are not captured are connected to the null
/// device and contribute nothing to the run's completion condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Executable to run. Must be non-empty.
    pub program: String,
    /// Arguments passed to the executable, in order, unmodified.
    pub args: Vec<String>,
    /// Optional working directory override.
    pub cwd: Option<PathBuf>,
    /// Additional environment variables for the process.
    pub env: BTreeMap<String, String>,
    /// Whether to capture stdout.
    #[serde(default = "default_true")]
    pub capture_stdout: bool,
    /// Whether to capture stderr.
    #[serde(default = "default_true")]
    pub capture_stderr: bool,
    /// Maximum wall-clock time before the process is killed.
    /// `None` or zero means wait indefinitely.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "option_duration_millis"
    )]
    pub timeout: Option<Duration>,
}

fn default_true() -> bool {
    true
}

/// Serde helper for `Option<Duration>` as milliseconds.
mod option_duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(val: &Option<Duration>, ser: S) -> Result<S::Ok, S::Error> {
        match val {
            Some(d) => d.as_millis().serialize(ser),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Duration>, D::Error> {
        let opt: Option<u64> = Option::deserialize(de)?;
        Ok(opt.map(Duration::from_millis))
    }
}

impl ProcessSpec {
    /// Create a spec with the given program, both streams captured, and no
    /// timeout.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            capture_stdout: true,
            capture_stderr: true,
            timeout: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set whether stdout is captured.
    pub fn capture_stdout(mut self, capture: bool) -> Self {
        self.capture_stdout = capture;
        self
    }

    /// Set whether stderr is captured.
    pub fn capture_stderr(mut self, capture: bool) -> Self {
        self.capture_stderr = capture;
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
