//! Command-line grammar and argument parsing.

use std::io::Write;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use cloneable_core::{Error, Result, TOKEN_ENV_VAR};

use crate::report::ShortErrorReporter;
use crate::report::clap_backend::{ClapContext, is_informational, parse_failure};

/// Name of the binary, used as the root of every qualified command name.
pub const BIN_NAME: &str = "cloneable";

/// cloneable - work with GitHub repositories from the command line
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version)]
#[command(about = "Work with GitHub repositories from the command line", long_about = None)]
pub struct Cli {
    /// GitHub token used to authenticate API requests
    #[arg(long, global = true, env = TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Credential management
    Auth {
        /// Credential action to run
        #[command(subcommand)]
        action: AuthAction,
    },
}

/// `cloneable auth` sub-commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Verify that a GitHub token credential is available
    Check,
}

/// Parse `args` (without the program name).
///
/// Help and version output goes to `out` and yields `Ok(None)`. Parse
/// failures are reported on `err` and come back as [`Error::Usage`] carrying
/// the resolved exit code.
pub fn parse_args<O, E>(args: &[String], out: &mut O, err: &mut E) -> Result<Option<Cli>>
where
    O: Write,
    E: Write,
{
    let argv = std::iter::once(BIN_NAME.to_string()).chain(args.iter().cloned());
    let error = match Cli::try_parse_from(argv) {
        Ok(cli) => return Ok(Some(cli)),
        Err(error) => error,
    };

    if is_informational(error.kind()) {
        write!(out, "{}", error.render())?;
        return Ok(None);
    }
    if error.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand {
        write!(err, "{}", error.render())?;
        return Err(Error::usage(error.exit_code()));
    }

    let mut context = ClapContext::for_error(Cli::command(), &error, args, &mut *err);
    let mut failure = parse_failure(&error, &mut context);
    let exit_code = ShortErrorReporter::new().handle(&mut failure, args)?;
    Err(Error::usage(exit_code))
}
