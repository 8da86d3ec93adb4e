//! Process exit codes.

/// The invocation completed successfully.
pub const SUCCESS: i32 = 0;

/// Generic runtime failure.
pub const FAILURE: i32 = 1;

/// The command line was invalid. Default "exit code on invalid input".
pub const USAGE: i32 = 2;

/// No GitHub token credential was available.
pub const CREDENTIAL_MISSING: i32 = 3;
