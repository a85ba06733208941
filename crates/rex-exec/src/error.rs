// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for script execution.

use rex_process::ProcessError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent a script execution from running at all.
///
/// Script-level failures (nonzero exit, stderr output, timeout) are normal
/// outcomes reported into the [`crate::ActionSink`], not errors.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The script path does not point at an existing file.
    #[error("script file not found: {0}")]
    ScriptNotFound(PathBuf),

    /// Inline script content could not be persisted to a temp file.
    #[error("failed to persist script content: {0}")]
    PersistScript(#[source] std::io::Error),

    /// The interpreter process could not be started.
    #[error("failed to start interpreter: {0}")]
    Start(#[from] ProcessError),
}
