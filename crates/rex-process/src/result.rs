// SPDX-License-Identifier: MIT OR Apache-2.0
//! Run result type.

use serde::{Deserialize, Serialize};

/// Outcome of one child process invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunResult {
    /// Exit code of the process. `None` means the process did not complete
    /// before the timeout and a kill was attempted.
    pub exit_code: Option<i32>,
    /// Captured stdout text, one line per logical record. Empty if stdout
    /// was not captured or produced no output.
    pub stdout: String,
    /// Captured stderr text, same rules as `stdout`.
    pub stderr: String,
}

impl RunResult {
    /// Returns `true` if the process completed with exit code zero.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Returns `true` if the process was terminated on timeout (or its exit
    /// status was otherwise unobservable).
    pub fn timed_out(&self) -> bool {
        self.exit_code.is_none()
    }
}
