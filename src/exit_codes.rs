//! Stable exit codes for dbsync CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Runtime failure: spawn error, invalid command, or tool i/o failure.
pub const FAILURE: i32 = 1;
/// Configuration rejected during validation (aliases or cache target).
pub const CONFIG_INVALID: i32 = 2;
