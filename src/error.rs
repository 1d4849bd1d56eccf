//! Error types for `gtc-peer`
//!
//! The GTC method core signals almost every failure through its return
//! values (`ignore`, prompts, empty acknowledgements). Only the conditions
//! that leave the caller without any reply at all, and the CLI's own
//! failure modes, are modelled as errors here.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `gtc-peer` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Settings error (strict check failed, source missing)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not readable, output failed)
    pub const IO_ERROR: i32 = 3;

    /// GTC method error (no reply could be built)
    pub const METHOD_ERROR: i32 = 4;

    /// Usage error (invalid arguments, undecodable payload)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `gtc-peer` operations.
#[derive(Debug, Error)]
pub enum GtcPeerError {
    /// Settings file check failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GTC method could not produce a reply
    #[error(transparent)]
    Method(#[from] MethodError),

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GtcPeerError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Method(_) => ExitCode::METHOD_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Settings Errors
// ============================================================================

/// Errors reported by a strict settings check.
///
/// The loader itself never fails; these only surface when a caller asks
/// for the settings source to be validated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings source does not exist
    #[error("settings file not found: {path}")]
    MissingFile {
        /// Path that was probed
        path: PathBuf,
    },

    /// One or more recognized lines carried an out-of-range value
    #[error("{count} invalid setting(s) in {path}")]
    InvalidLines {
        /// Settings source path
        path: PathBuf,
        /// Number of rejected lines
        count: usize,
        /// The rejected lines, one issue each
        issues: Vec<SettingIssue>,
    },
}

/// A rejected settings line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingIssue {
    /// 1-based line number in the source
    pub line: usize,
    /// Key the line matched
    pub key: &'static str,
    /// Parsed (out-of-range) value
    pub value: u64,
    /// Accepted range, rendered for humans
    pub expected: String,
}

impl std::fmt::Display for SettingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: {} = {} (expected {})",
            self.line, self.key, self.value, self.expected
        )
    }
}

// ============================================================================
// Method Errors
// ============================================================================

/// Fatal conditions for a single GTC processing call.
///
/// When one of these is returned no response was built and the caller's
/// `MethodOutcome` was left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MethodError {
    /// Tunnel framing needs the user identity but the store has none
    #[error("identity not configured; cannot build tunnel response")]
    MissingIdentity,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `gtc-peer` operations.
pub type Result<T> = std::result::Result<T, GtcPeerError>;
