// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for process runs.

use thiserror::Error;

/// Errors that prevent a process run from producing a result.
///
/// A nonzero exit, empty output, or an expired timeout are normal outcomes
/// reported through [`crate::RunResult`], never through this type. Only the
/// inability to start the process at all is an error.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The spec's program path is empty.
    #[error("executable path is empty")]
    EmptyProgram,

    /// The child process could not be created (bad path, permission,
    /// invalid working directory).
    #[error("failed to start process: {0}")]
    Spawn(#[source] std::io::Error),
}
