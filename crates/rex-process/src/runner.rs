// SPDX-License-Identifier: MIT OR Apache-2.0
//! Child process execution: spawn, concurrent stream drains, timeout race.

use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::time;
use tracing::{debug, warn};

use crate::{ProcessError, ProcessSpec, RunResult};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Run a child process to completion (or timeout) and capture its output.
///
/// Both captured streams are drained concurrently with waiting for exit, so
/// the child can never block on a full pipe buffer no matter how much it
/// writes. The run is considered complete once the process has exited AND
/// every captured stream has reached end-of-data; that completion set is
/// raced against `spec.timeout` when one is configured (zero or `None`
/// waits indefinitely).
///
/// On timeout the child is killed best-effort, termination failures are
/// swallowed, and the result carries whatever output had accumulated with
/// `exit_code: None`. A nonzero exit is a normal result, not an error;
/// only failure to start the process returns [`ProcessError`].
pub async fn run(spec: &ProcessSpec) -> Result<RunResult, ProcessError> {
    if spec.program.is_empty() {
        return Err(ProcessError::EmptyProgram);
    }

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .kill_on_drop(true);
    cmd.stdout(if spec.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stderr(if spec.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }

    for (k, v) in &spec.env {
        cmd.env(k, v);
    }

    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);

    let mut child = cmd.spawn().map_err(ProcessError::Spawn)?;
    debug!(target: "rex.process", "spawned {} (pid={:?})", spec.program, child.id());

    // Fresh buffers per invocation; nothing is shared across runs.
    let stdout_buf = Arc::new(Mutex::new(String::new()));
    let stderr_buf = Arc::new(Mutex::new(String::new()));

    let stdout_done = child
        .stdout
        .take()
        .map(|stream| tokio::spawn(drain_lines(stream, Arc::clone(&stdout_buf))));
    let stderr_done = child
        .stderr
        .take()
        .map(|stream| tokio::spawn(drain_lines(stream, Arc::clone(&stderr_buf))));

    // Completion set: process exit AND end-of-stream on every captured
    // pipe. The drains run as their own tasks, so awaiting them here in
    // sequence does not serialize the reads.
    let completed = async {
        let status = child.wait().await;
        if let Some(done) = stdout_done {
            let _ = done.await;
        }
        if let Some(done) = stderr_done {
            let _ = done.await;
        }
        status
    };

    let finished = match spec.timeout {
        Some(limit) if !limit.is_zero() => time::timeout(limit, completed).await.ok(),
        _ => Some(completed.await),
    };

    let exit_code = match finished {
        Some(Ok(status)) => status.code(),
        Some(Err(e)) => {
            warn!(target: "rex.process", "failed to observe exit status: {e}");
            None
        }
        None => {
            // Timeout: kill best-effort, outcome unobserved. The drains are
            // not awaited further; whatever they captured so far is what we
            // report.
            debug!(target: "rex.process", "timeout elapsed, killing {}", spec.program);
            let _ = child.kill().await;
            None
        }
    };

    let stdout = stdout_buf.lock().await.clone();
    let stderr = stderr_buf.lock().await.clone();

    Ok(RunResult {
        exit_code,
        stdout,
        stderr,
    })
}

/// Read a stream line by line into `buf` until end-of-data.
///
/// Line order within the stream is preserved; each line is appended with a
/// trailing `\n` regardless of the platform line ending the child emitted.
async fn drain_lines<R>(stream: R, buf: Arc<Mutex<String>>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                let text = line.trim_end_matches(['\r', '\n']);
                let mut buf = buf.lock().await;
                buf.push_str(text);
                buf.push('\n');
            }
            Err(e) => {
                // Pipe broke mid-stream: keep what was captured and let the
                // other stream and the exit wait carry on.
                warn!(target: "rex.process", "stream read failed: {e}");
                break;
            }
        }
    }
}
