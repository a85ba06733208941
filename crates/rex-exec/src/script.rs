// SPDX-License-Identifier: MIT OR Apache-2.0
//! Script sources: an on-disk file or inline content persisted to a temp file.

use crate::ExecError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Where the script to execute comes from.
#[derive(Debug, Clone)]
pub enum ScriptSource {
    /// An existing script file on disk.
    File(PathBuf),
    /// Raw script text, written to a uniquely named `.rb` temp file before
    /// invocation.
    Inline(String),
}

/// A script resolved to a concrete path for the duration of one run.
///
/// Holds the temp file handle for inline sources so the file outlives the
/// child process; it is removed when this value drops.
#[derive(Debug)]
pub(crate) enum PreparedScript {
    OnDisk(PathBuf),
    Temp(NamedTempFile),
}

impl PreparedScript {
    pub(crate) fn path(&self) -> &Path {
        match self {
            Self::OnDisk(path) => path,
            Self::Temp(file) => file.path(),
        }
    }
}

impl ScriptSource {
    pub(crate) fn prepare(&self) -> Result<PreparedScript, ExecError> {
        match self {
            Self::File(path) => {
                if path.is_file() {
                    Ok(PreparedScript::OnDisk(path.clone()))
                } else {
                    Err(ExecError::ScriptNotFound(path.clone()))
                }
            }
            Self::Inline(content) => {
                let mut file = tempfile::Builder::new()
                    .prefix("rex-script-")
                    .suffix(".rb")
                    .tempfile()
                    .map_err(ExecError::PersistScript)?;
                file.write_all(content.as_bytes())
                    .map_err(ExecError::PersistScript)?;
                file.flush().map_err(ExecError::PersistScript)?;
                debug!(target: "rex.exec", "inline script persisted to {}", file.path().display());
                Ok(PreparedScript::Temp(file))
            }
        }
    }
}
