//! Exit code constants for the assetgen CLI.
//!
//! - 0: Success (including runs where individual items failed)
//! - 1: User error (bad args, unreadable or invalid config)
//! - 2: Generation failure (only reported with `--strict`)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing project root, or invalid config.
pub const USER_ERROR: i32 = 1;

/// At least one item failed or a job aborted, and `--strict` was requested.
pub const GENERATION_FAILURE: i32 = 2;
