//! cloneable core — errors, exit codes, and credential resolution.
//!
//! This crate has no internal cloneable dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`exit_code`]: Process exit codes
//! - [`credential`]: GitHub token resolution

pub mod credential;
pub mod error;
pub mod exit_code;

mod proptests;

// Re-export key types at crate root for convenience
pub use credential::{TOKEN_ENV_VAR, TOKEN_NAME, Token, TokenSource, resolve_token};
pub use error::{DEFAULT_CREDENTIAL_MESSAGE, Error, Result};
