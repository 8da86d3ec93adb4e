//! Error types for cloneable-core.

use crate::credential::{TOKEN_ENV_VAR, TOKEN_NAME};
use crate::exit_code;

/// Message used when no GitHub token could be found.
pub const DEFAULT_CREDENTIAL_MESSAGE: &str =
    "No GitHub token credential provided or GITHUB_TOKEN environment variable missing.";

/// Errors that terminate a cloneable invocation.
///
/// Every variant maps to a process exit code via [`Error::exit_code`], so the
/// binary's entry point is the only place that decides how the process ends.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No usable authentication credential is available.
    #[error("{message}")]
    CredentialMissing {
        /// Human-readable explanation
        message: String,
    },

    /// The command line was rejected and the failure has already been
    /// reported on the error stream.
    #[error("invalid invocation (exit code {exit_code})")]
    Usage {
        /// Exit code resolved while reporting the failure
        exit_code: i32,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (usually writing to the terminal)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type alias for cloneable operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a credential error carrying the default message.
    pub fn credential_missing() -> Self {
        Self::credential_missing_with(DEFAULT_CREDENTIAL_MESSAGE)
    }

    /// Creates a credential error carrying `message` verbatim.
    pub fn credential_missing_with<S: Into<String>>(message: S) -> Self {
        Error::CredentialMissing {
            message: message.into(),
        }
    }

    /// Creates a usage error for a parse failure that was already reported.
    pub fn usage(exit_code: i32) -> Self {
        Error::Usage { exit_code }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::CredentialMissing { .. } => exit_code::CREDENTIAL_MISSING,
            Error::Usage { exit_code } => *exit_code,
            Error::Config { .. } | Error::Io(_) => exit_code::FAILURE,
        }
    }

    /// Returns whether the failure has already been shown to the user.
    pub fn is_reported(&self) -> bool {
        matches!(self, Error::Usage { .. })
    }

    /// Remediation hint shown after the error message, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::CredentialMissing { .. } => Some(format!(
                "pass a {TOKEN_NAME} with --token or export {TOKEN_ENV_VAR}"
            )),
            _ => None,
        }
    }
}
