//! GitHub token resolution.
//!
//! The token comes from an explicit value (the `--token` option, which clap
//! also fills from the environment) or from the [`TOKEN_ENV_VAR`] variable.
//! Blank values are treated as absent.

use std::fmt;

use crate::error::{Error, Result};

/// Human-readable name of the credential.
pub const TOKEN_NAME: &str = "GitHub token";

/// Environment variable expected to carry the credential.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Supplied explicitly by the caller.
    Explicit,
    /// Read from [`TOKEN_ENV_VAR`].
    Environment,
}

/// An authentication token. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    secret: String,
    source: TokenSource,
}

impl Token {
    /// The raw secret, for handing to an HTTP client.
    pub fn expose(&self) -> &str {
        &self.secret
    }

    /// Where the token was found.
    pub fn source(&self) -> TokenSource {
        self.source
    }

    /// A masked rendering safe for terminals and logs.
    ///
    /// Tokens longer than eight characters keep their first four characters
    /// (GitHub prefixes such as `ghp_`); shorter ones are fully masked.
    pub fn masked(&self) -> String {
        let len = self.secret.chars().count();
        if len > 8 {
            let prefix: String = self.secret.chars().take(4).collect();
            format!("{prefix}{}", "*".repeat(len - 4))
        } else {
            "*".repeat(len)
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("secret", &self.masked())
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Resolve the token from `explicit` or the process environment.
pub fn resolve_token(explicit: Option<&str>) -> Result<Token> {
    resolve_token_from(explicit, |name| std::env::var(name).ok())
}

/// Resolve the token from `explicit` or from `lookup(TOKEN_ENV_VAR)`.
pub fn resolve_token_from<F>(explicit: Option<&str>, lookup: F) -> Result<Token>
where
    F: FnOnce(&str) -> Option<String>,
{
    if let Some(secret) = non_blank(explicit) {
        tracing::debug!("using explicitly supplied {TOKEN_NAME}");
        return Ok(Token {
            secret,
            source: TokenSource::Explicit,
        });
    }

    match non_blank(lookup(TOKEN_ENV_VAR).as_deref()) {
        Some(secret) => {
            tracing::debug!(var = TOKEN_ENV_VAR, "using {TOKEN_NAME} from environment");
            Ok(Token {
                secret,
                source: TokenSource::Environment,
            })
        }
        None => {
            tracing::debug!(var = TOKEN_ENV_VAR, "no {TOKEN_NAME} available");
            Err(Error::credential_missing())
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
