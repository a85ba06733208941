// SPDX-License-Identifier: MIT OR Apache-2.0
//! One script execution: command preparation, run, and result reporting.

use crate::ExecError;
use crate::output::parse_output;
use crate::script::ScriptSource;
use crate::sink::ActionSink;
use rex_process::{ProcessSpec, RunResult};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Interpreter invoked when none is configured.
pub const DEFAULT_INTERPRETER: &str = "ruby";

/// Delimiter used to split output lines when none is configured.
pub const DEFAULT_DELIMITER: &str = "=";

/// One positional script parameter.
///
/// Only `value` reaches the command line; `name` identifies the parameter
/// toward the host. Values pass through unmodified — callers must quote
/// values containing spaces or shell-special characters themselves.
#[derive(Debug, Clone)]
pub struct ScriptParam {
    /// Parameter name, for reporting only.
    pub name: String,
    /// Value appended to the command line.
    pub value: String,
}

impl ScriptParam {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A configured script execution.
///
/// Owns everything one invocation needs: the interpreter, the script
/// source, ordered parameters, the output delimiter, and an optional
/// timeout. [`RubyExecution::execute`] runs the script and reports results
/// into the supplied [`ActionSink`].
#[derive(Debug)]
pub struct RubyExecution {
    interpreter: String,
    source: ScriptSource,
    params: Vec<ScriptParam>,
    delimiter: String,
    timeout: Option<Duration>,
}

impl RubyExecution {
    /// Create an execution for the given script source with defaults:
    /// `ruby`, delimiter `=`, no parameters, no timeout.
    pub fn new(source: ScriptSource) -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            source,
            params: Vec::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            timeout: None,
        }
    }

    /// Override the interpreter program.
    pub fn interpreter(mut self, program: impl Into<String>) -> Self {
        self.interpreter = program.into();
        self
    }

    /// Set the ordered parameter list.
    pub fn params(mut self, params: Vec<ScriptParam>) -> Self {
        self.params = params;
        self
    }

    /// Set the output delimiter. Empty falls back to [`DEFAULT_DELIMITER`].
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the execution timeout. Zero or unset waits indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run the script and report into `sink`.
    ///
    /// Captured stderr becomes one error entry, a timed-out run an
    /// additional one, and each delimiter-split stdout line an output pair.
    /// Returns the raw [`RunResult`] alongside; errors only when the script
    /// is missing, inline content cannot be persisted, or the interpreter
    /// cannot be started.
    pub async fn execute(&self, sink: &mut dyn ActionSink) -> Result<RunResult, ExecError> {
        let script = self.source.prepare()?;
        let spec = self.build_spec(script.path());
        debug!(
            target: "rex.exec",
            "executing {} {}", self.interpreter, script.path().display()
        );

        let result = rex_process::run(&spec).await?;
        self.report(&result, sink);
        Ok(result)
    }

    fn build_spec(&self, script: &Path) -> ProcessSpec {
        let mut spec = ProcessSpec::new(self.interpreter.as_str())
            .arg(script.to_string_lossy().into_owned());
        if let Some(dir) = script.parent() {
            if !dir.as_os_str().is_empty() {
                spec = spec.cwd(dir);
            }
        }
        for param in &self.params {
            spec = spec.arg(param.value.as_str());
        }
        if let Some(timeout) = self.timeout {
            spec = spec.timeout(timeout);
        }
        spec
    }

    fn report(&self, result: &RunResult, sink: &mut dyn ActionSink) {
        if !result.stderr.trim().is_empty() {
            sink.add_error(&format!("Console Errors:\n{}", result.stderr));
        }
        if result.timed_out() {
            sink.add_error("script execution timed out and the process was terminated");
        }
        for (name, value) in parse_output(&result.stdout, &self.delimiter) {
            sink.add_output(&name, &value);
        }
        match result.exit_code {
            Some(code) => sink.add_ex_info(&format!("interpreter exited with code {code}")),
            None => sink.add_ex_info("interpreter did not exit before the timeout"),
        }
    }
}
