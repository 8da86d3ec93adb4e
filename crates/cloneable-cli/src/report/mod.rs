//! Short reports for command-line parse failures.
//!
//! When an invocation does not match the command grammar, the default clap
//! output (full error plus usage plus tips) is replaced with a compact
//! report:
//!
//! ```text
//! Unknown option: '--verbos'
//! Possible solutions: --verbose
//! Usage: cloneable auth check [OPTIONS]
//! Try 'cloneable auth check --help' for more information.
//! ```
//!
//! The reporter only talks to a [`CommandContext`], so any argument parser
//! can drive it. [`clap_backend`] provides the implementation for clap.

pub mod clap_backend;

use std::io::{self, Write};

use cloneable_core::exit_code;

/// Category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An option that the command does not define.
    UnknownOption,
    /// A positional argument that nothing consumed.
    UnmatchedArgument,
    /// A sub-command name that does not exist.
    UnknownSubcommand,
    /// A required option or positional was not given.
    MissingArgument,
    /// A required sub-command was not given.
    MissingSubcommand,
    /// A value was rejected by the option's parser.
    InvalidValue,
    /// Anything else the parser rejected.
    Other,
}

impl FailureKind {
    /// Whether this kind refers to tokens the parser could not match.
    pub fn is_unmatched(self) -> bool {
        matches!(
            self,
            FailureKind::UnknownOption
                | FailureKind::UnmatchedArgument
                | FailureKind::UnknownSubcommand
        )
    }
}

/// A rejected invocation, bound to the command it failed against.
pub struct ParseFailure<'c> {
    kind: FailureKind,
    message: String,
    unmatched: Vec<String>,
    command: &'c mut dyn CommandContext,
}

impl<'c> ParseFailure<'c> {
    /// Create a failure with no unmatched-argument detail.
    pub fn new<S: Into<String>>(
        kind: FailureKind,
        message: S,
        command: &'c mut dyn CommandContext,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            unmatched: Vec::new(),
            command,
        }
    }

    /// Attach the tokens the parser could not match.
    pub fn with_unmatched<I, S>(mut self, unmatched: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unmatched = unmatched.into_iter().map(Into::into).collect();
        self
    }

    /// Failure category.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Human-readable message, printed verbatim as the first report line.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Tokens the parser could not match; empty when not applicable.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Whether unmatched-argument detail is available.
    pub fn has_unmatched(&self) -> bool {
        !self.unmatched.is_empty()
    }

    /// The command the invocation failed against.
    pub fn command(&self) -> &(dyn CommandContext + 'c) {
        &*self.command
    }

    fn command_mut(&mut self) -> &mut (dyn CommandContext + 'c) {
        &mut *self.command
    }
}

impl std::fmt::Debug for ParseFailure<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseFailure")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("unmatched", &self.unmatched)
            .field("command", &self.command.qualified_name())
            .finish()
    }
}

/// Maps a parse failure to a process exit code.
pub trait ExitCodeMapper {
    /// Exit code for `failure`.
    fn exit_code(&self, failure: &ParseFailure<'_>) -> i32;
}

impl<F> ExitCodeMapper for F
where
    F: Fn(&ParseFailure<'_>) -> i32,
{
    fn exit_code(&self, failure: &ParseFailure<'_>) -> i32 {
        self(failure)
    }
}

/// What the reporter needs to know about the command that failed.
///
/// Implemented once per argument-parsing backend.
pub trait CommandContext {
    /// Full invocation path, e.g. `cloneable auth check`.
    fn qualified_name(&self) -> String;

    /// Usage summary. Written as-is, so include a trailing newline if the
    /// help hint should start on its own line.
    fn synopsis(&self) -> String;

    /// "Did you mean" lines for the unmatched tokens of `failure`.
    fn suggestions_for(&self, failure: &ParseFailure<'_>, args: &[String]) -> Vec<String>;

    /// Explicit failure-to-exit-code mapping, if one is configured.
    fn exit_code_mapper(&self) -> Option<&dyn ExitCodeMapper> {
        None
    }

    /// Exit code used when no mapper is configured.
    fn exit_code_on_invalid_input(&self) -> i32 {
        exit_code::USAGE
    }

    /// Stream that receives the report.
    fn err(&mut self) -> &mut dyn Write;
}

/// Writes short parse-failure reports and resolves the exit code.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortErrorReporter;

impl ShortErrorReporter {
    /// Create a reporter.
    pub fn new() -> Self {
        Self
    }

    /// Report `failure` on the command's error stream and return the exit
    /// code the process should end with.
    ///
    /// `args` are the raw command-line arguments, used only to compute
    /// suggestions. Write errors are returned, never swallowed.
    pub fn handle(&self, failure: &mut ParseFailure<'_>, args: &[String]) -> io::Result<i32> {
        let suggestions = if failure.has_unmatched() {
            failure.command().suggestions_for(failure, args)
        } else {
            Vec::new()
        };
        let synopsis = failure.command().synopsis();
        let qualified_name = failure.command().qualified_name();
        let exit_code = match failure.command().exit_code_mapper() {
            Some(mapper) => mapper.exit_code(failure),
            None => failure.command().exit_code_on_invalid_input(),
        };
        let message = failure.message().to_string();

        let err = failure.command_mut().err();
        writeln!(err, "{message}")?;
        for suggestion in &suggestions {
            writeln!(err, "{suggestion}")?;
        }
        write!(err, "{synopsis}")?;
        writeln!(err, "Try '{qualified_name} --help' for more information.")?;
        err.flush()?;

        Ok(exit_code)
    }
}

// ============================================================================
// Tests
// ============================================================================
