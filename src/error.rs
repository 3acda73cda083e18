//! Error taxonomy for the sync extension.

use std::io;

use thiserror::Error;

/// Errors surfaced by the command runner and the orchestrator.
///
/// Non-zero exit codes from the external tool are deliberately absent here:
/// the tool's exit status is never inspected and callers judge success from
/// the captured output.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing or rejected configuration: absent aliases, an unreachable
    /// alias, or a cache target the tool refuses. Fatal to the orchestrator
    /// instance; no lifecycle trigger may fire afterwards.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The runner was asked to execute without a sub-command attached.
    #[error("tool command is invalid: no sub-command attached")]
    InvalidCommand,

    /// The OS refused to create the child process.
    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// I/O failure while draining or waiting on the child process.
    #[error("tool i/o error")]
    Io(#[source] io::Error),
}
