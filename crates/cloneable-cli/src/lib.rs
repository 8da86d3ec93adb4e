//! # cloneable-cli
//!
//! Command-line front end for cloneable.
//!
//! - [`cli`]: the clap grammar and argument parsing
//! - [`report`]: short reports for parse failures and exit-code resolution
//! - [`suggest`]: "did you mean" matching
//! - [`logging`]: tracing subscriber setup

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod logging;
pub mod report;
pub mod suggest;

use std::io::Write;

use cloneable_core::{Error, Result, TOKEN_NAME, exit_code, resolve_token};

use crate::cli::{AuthAction, Commands, parse_args};

/// Parse `args` (without the program name) and run the selected command.
///
/// Regular output goes to `out`; diagnostics go to `err`.
pub fn run<O, E>(args: &[String], out: &mut O, err: &mut E) -> Result<()>
where
    O: Write,
    E: Write,
{
    let Some(cli) = parse_args(args, out, err)? else {
        return Ok(());
    };
    logging::init(cli.verbose);
    tracing::debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Commands::Auth {
            action: AuthAction::Check,
        } => auth_check(cli.token.as_deref(), out),
    }
}

fn auth_check<O: Write>(token: Option<&str>, out: &mut O) -> Result<()> {
    let token = resolve_token(token)?;
    tracing::info!(source = ?token.source(), "{TOKEN_NAME} resolved");
    writeln!(out, "{TOKEN_NAME} found: {token}")?;
    Ok(())
}

/// Turn the outcome of [`run`] into a process exit code.
///
/// Errors that were not already reported are written to `err` together with
/// their remediation hint.
pub fn finish<E: Write>(result: Result<()>, err: &mut E) -> i32 {
    let error = match result {
        Ok(()) => return exit_code::SUCCESS,
        Err(error) => error,
    };
    if !error.is_reported() {
        tracing::debug!(error = ?error, "command failed");
        // Nothing sensible is left to do if stderr itself is gone.
        let _ = write_error(&error, err);
    }
    error.exit_code()
}

fn write_error<E: Write>(error: &Error, err: &mut E) -> std::io::Result<()> {
    writeln!(err, "error: {error}")?;
    if let Some(hint) = error.hint() {
        writeln!(err, "hint: {hint}")?;
    }
    err.flush()
}
