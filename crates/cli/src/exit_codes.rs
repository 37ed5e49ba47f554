//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args, missing file) |
//! | 3-9   | recon     | Reconciliation-specific codes            |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Reconciliation ran but at least one cart reported an error status.
pub const EXIT_RECON_MISMATCH: u8 = 3;

/// Config file failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 4;

/// Runtime failure (unreadable plan/scan file, bad input data).
pub const EXIT_RECON_RUNTIME: u8 = 5;
