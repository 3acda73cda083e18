//! Child process execution with concurrent line-oriented output drains.
//!
//! Both pipes get a dedicated reader thread. A child that fills the OS pipe
//! buffer on one stream before finishing the other would deadlock a parent
//! that drained the streams sequentially; concurrent drains make that
//! impossible. There is no timeout: a hung child hangs the caller.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, error, instrument};

use crate::error::SyncError;

/// Longest line kept per read; bytes past this boundary are dropped.
pub const MAX_LINE_BYTES: usize = 4096;

/// Captured child output, split into ordered line sequences.
///
/// Owned by the caller; nothing is retained across invocations.
#[derive(Debug, Default)]
pub struct RunOutput {
    /// Non-empty stdout lines in arrival order.
    pub stdout: Vec<String>,
    /// All stderr lines in arrival order.
    pub stderr: Vec<String>,
}

/// Spawn `cmd` and drain stdout and stderr to end-of-stream.
///
/// Blocks until the child exits and both pipes are closed. Exit status is
/// deliberately not inspected; callers judge success from the captured
/// output. `display` is the human-readable command line, used for errors.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_to_lines(mut cmd: Command, display: &str) -> Result<RunOutput, SyncError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    // Rebind under a different name: tracing's macros shadow any binding
    // named `display` with `tracing::field::display`.
    let command_line = display;
    debug!(command = command_line, "spawning tool process");
    let mut child = cmd.spawn().map_err(|e| {
        error!(err = %e, command = command_line, "failed to spawn tool");
        SyncError::Spawn {
            command: display.to_string(),
            source: e,
        }
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| SyncError::Io(other("stdout was not piped")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| SyncError::Io(other("stderr was not piped")))?;

    let stdout_handle = thread::spawn(move || read_lines(stdout, true));
    let stderr_handle = thread::spawn(move || read_lines(stderr, false));

    // TODO: surface non-zero exit codes once callers stop inferring failure
    // from output contents.
    let status = child.wait().map_err(SyncError::Io)?;

    let stdout_lines = join_reader(stdout_handle)?;
    let stderr_lines = join_reader(stderr_handle)?;

    debug!(
        exit_code = ?status.code(),
        stdout_lines = stdout_lines.len(),
        stderr_lines = stderr_lines.len(),
        "tool process finished"
    );
    Ok(RunOutput {
        stdout: stdout_lines,
        stderr: stderr_lines,
    })
}

/// Read a pipe to end-of-stream as capped lines.
///
/// `skip_empty` drops blank lines from the captured sequence (stdout
/// semantics); stderr keeps every line.
fn read_lines<R: Read>(reader: R, skip_empty: bool) -> Result<Vec<String>, std::io::Error> {
    let mut buf_reader = BufReader::new(reader);
    let mut lines = Vec::new();
    loop {
        let mut raw = Vec::new();
        let n = buf_reader.read_until(b'\n', &mut raw)?;
        if n == 0 {
            break;
        }
        while raw.last().is_some_and(|b| *b == b'\n' || *b == b'\r') {
            raw.pop();
        }
        raw.truncate(MAX_LINE_BYTES);
        let line = String::from_utf8_lossy(&raw).into_owned();
        if skip_empty && line.is_empty() {
            continue;
        }
        lines.push(line);
    }
    Ok(lines)
}

fn join_reader(
    handle: thread::JoinHandle<Result<Vec<String>, std::io::Error>>,
) -> Result<Vec<String>, SyncError> {
    match handle.join() {
        Ok(result) => result.map_err(SyncError::Io),
        Err(_) => Err(SyncError::Io(other("output reader thread panicked"))),
    }
}

fn other(msg: &str) -> std::io::Error {
    std::io::Error::other(msg)
}
