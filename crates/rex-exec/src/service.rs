// SPDX-License-Identifier: MIT OR Apache-2.0
//! Script executer service: the two actions exposed to the host.

use crate::execution::{DEFAULT_INTERPRETER, RubyExecution, ScriptParam};
use crate::script::ScriptSource;
use crate::sink::ActionSink;
use rex_process::RunResult;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Executes Ruby scripts as host actions.
///
/// Failures of any kind are reported into the [`ActionSink`]; the service
/// never panics the host and never returns an error to it. Each action
/// hands back the raw [`RunResult`] when the interpreter ran at all, so
/// callers can still observe the child's exit code.
#[derive(Debug, Clone)]
pub struct ScriptExecuterService {
    interpreter: String,
}

impl Default for ScriptExecuterService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptExecuterService {
    /// Service using the default `ruby` interpreter.
    pub fn new() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }

    /// Service using a custom interpreter program.
    pub fn with_interpreter(program: impl Into<String>) -> Self {
        Self {
            interpreter: program.into(),
        }
    }

    /// Execute a script file.
    ///
    /// Returns the run result, or `None` when the script was missing or the
    /// interpreter could not be started (reported into the sink).
    pub async fn execute_script_file(
        &self,
        sink: &mut dyn ActionSink,
        script_path: PathBuf,
        delimiter: &str,
        params: Vec<ScriptParam>,
        timeout: Option<Duration>,
    ) -> Option<RunResult> {
        self.run(sink, ScriptSource::File(script_path), delimiter, params, timeout)
            .await
    }

    /// Execute inline script content (persisted to a temp file first).
    ///
    /// Returns the run result, or `None` when the content could not be
    /// persisted or the interpreter could not be started (reported into
    /// the sink).
    pub async fn execute_script(
        &self,
        sink: &mut dyn ActionSink,
        content: String,
        delimiter: &str,
        params: Vec<ScriptParam>,
        timeout: Option<Duration>,
    ) -> Option<RunResult> {
        self.run(sink, ScriptSource::Inline(content), delimiter, params, timeout)
            .await
    }

    async fn run(
        &self,
        sink: &mut dyn ActionSink,
        source: ScriptSource,
        delimiter: &str,
        params: Vec<ScriptParam>,
        timeout: Option<Duration>,
    ) -> Option<RunResult> {
        let mut execution = RubyExecution::new(source)
            .interpreter(self.interpreter.as_str())
            .delimiter(delimiter)
            .params(params);
        if let Some(timeout) = timeout {
            execution = execution.timeout(timeout);
        }

        match execution.execute(sink).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(target: "rex.exec", "script execution failed: {e}");
                sink.add_error(&format!("error while executing script: {e}"));
                None
            }
        }
    }
}
