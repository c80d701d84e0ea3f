//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, store, timeline file).
    #[allow(dead_code)]
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong identity or secret).
    pub const AUTH_FAILED: i32 = 5;

    /// Attempts are currently locked out.
    pub const LOCKED_OUT: i32 = 6;

    /// No active session for a gated command.
    pub const NO_SESSION: i32 = 7;
}
