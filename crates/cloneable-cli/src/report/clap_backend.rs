//! [`CommandContext`] for clap commands, and conversion of `clap::Error`
//! into [`ParseFailure`].

use std::io::Write;

use clap::{ArgAction, Command};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use cloneable_core::exit_code;

use super::{CommandContext, ExitCodeMapper, FailureKind, ParseFailure};
use crate::suggest::did_you_mean;

/// A clap command tree positioned at the sub-command an invocation reached.
pub struct ClapContext<W> {
    command: Command,
    path: Vec<String>,
    offending_index: Option<usize>,
    mapper: Option<Box<dyn ExitCodeMapper>>,
    invalid_input_code: i32,
    err: W,
}

impl<W: Write> ClapContext<W> {
    /// Locate the sub-command of `root` that `args` reached.
    ///
    /// `args` are the user's arguments without the program name. Option
    /// values are skipped and `--` ends the walk.
    pub fn new(root: Command, args: &[String], err: W) -> Self {
        Self::walk(root, args, None, err)
    }

    /// Locate the sub-command that rejected `error`.
    ///
    /// The walk stops at the token clap failed on, so sub-commands named
    /// after it are never entered.
    pub fn for_error(root: Command, error: &clap::Error, args: &[String], err: W) -> Self {
        let offending = offending_token(error);
        Self::walk(root, args, offending.as_deref(), err)
    }

    fn walk(mut root: Command, args: &[String], offending: Option<&str>, err: W) -> Self {
        root.build();

        let mut current = &root;
        let mut path = vec![root.get_name().to_string()];
        let mut offending_index = None;
        let mut positionals_taken = 0;
        let mut tokens = args.iter().enumerate();
        while let Some((index, token)) = tokens.next() {
            if token == "--" {
                break;
            }
            let rejected = offending.is_some_and(|o| same_token(token, o));
            if token.starts_with('-') && token.len() > 1 {
                if rejected {
                    offending_index = Some(index);
                    break;
                }
                if option_consumes_next(current, token) {
                    tokens.next();
                }
                continue;
            }
            if let Some(sub) = current.find_subcommand(token) {
                path.push(sub.get_name().to_string());
                current = sub;
                positionals_taken = 0;
                continue;
            }
            let capacity = positional_capacity(current);
            if rejected && positionals_taken >= capacity {
                offending_index = Some(index);
                break;
            }
            if capacity == 0 {
                break;
            }
            // Positional value; a later token may still be a sub-command.
            positionals_taken += 1;
        }

        let command = current.clone().bin_name(path.join(" "));
        Self {
            command,
            path,
            offending_index,
            mapper: None,
            invalid_input_code: exit_code::USAGE,
            err,
        }
    }

    /// Use `mapper` to compute the exit code instead of the fixed default.
    pub fn with_exit_code_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&ParseFailure<'_>) -> i32 + 'static,
    {
        self.mapper = Some(Box::new(mapper));
        self
    }

    /// Exit code returned when no mapper is configured.
    pub fn with_exit_code_on_invalid_input(mut self, code: i32) -> Self {
        self.invalid_input_code = code;
        self
    }

    /// Names from the root command to the reached sub-command.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Position in the raw arguments of the token the parser rejected.
    pub fn offending_index(&self) -> Option<usize> {
        self.offending_index
    }

    /// Consume the context and return the error stream.
    pub fn into_err(self) -> W {
        self.err
    }

    fn option_candidates(&self) -> Vec<String> {
        let mut candidates = Vec::new();
        for arg in self.command.get_arguments() {
            if arg.is_hide_set() {
                continue;
            }
            if let Some(long) = arg.get_long() {
                candidates.push(format!("--{long}"));
            }
            if let Some(aliases) = arg.get_visible_aliases() {
                candidates.extend(aliases.into_iter().map(|alias| format!("--{alias}")));
            }
        }
        candidates
    }

    fn subcommand_candidates(&self) -> Vec<String> {
        let mut candidates = Vec::new();
        for sub in self.command.get_subcommands() {
            if sub.is_hide_set() {
                continue;
            }
            candidates.push(sub.get_name().to_string());
            candidates.extend(sub.get_visible_aliases().map(str::to_string));
        }
        candidates
    }
}

impl<W: Write> CommandContext for ClapContext<W> {
    fn qualified_name(&self) -> String {
        self.path.join(" ")
    }

    fn synopsis(&self) -> String {
        let usage = self.command.clone().render_usage().to_string();
        format!("{}\n", usage.trim_end())
    }

    fn suggestions_for(&self, failure: &ParseFailure<'_>, args: &[String]) -> Vec<String> {
        let mut lines = Vec::new();
        for token in failure.unmatched() {
            if token.starts_with('-') {
                let candidates: Vec<String> = self
                    .option_candidates()
                    .into_iter()
                    .filter(|candidate| !already_given(candidate, args))
                    .collect();
                let matches = did_you_mean(token, candidates);
                if !matches.is_empty() {
                    lines.push(format!("Possible solutions: {}", matches.join(", ")));
                }
            } else {
                let matches = did_you_mean(token, self.subcommand_candidates());
                if !matches.is_empty() {
                    let qualified = self.qualified_name();
                    let options: Vec<String> = matches
                        .iter()
                        .map(|name| format!("{qualified} {name}"))
                        .collect();
                    lines.push(format!("Did you mean: {}?", options.join(" or ")));
                }
            }
        }
        lines
    }

    fn exit_code_mapper(&self) -> Option<&dyn ExitCodeMapper> {
        self.mapper.as_deref()
    }

    fn exit_code_on_invalid_input(&self) -> i32 {
        self.invalid_input_code
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.err
    }
}

/// Whether `kind` is a help or version request rather than a failure.
pub fn is_informational(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

/// Convert a clap error into a short [`ParseFailure`] bound to `context`.
///
/// Build `context` with [`ClapContext::for_error`] so stray positional
/// arguments are reported with their position.
pub fn parse_failure<'c, W: Write>(
    error: &clap::Error,
    context: &'c mut ClapContext<W>,
) -> ParseFailure<'c> {
    let stray_index = context.offending_index();
    let (kind, message, unmatched) = describe(error, stray_index).unwrap_or_else(|| {
        let rendered = error.render().to_string();
        let first = rendered.lines().next().unwrap_or_default();
        let message = first.strip_prefix("error: ").unwrap_or(first).to_string();
        (FailureKind::Other, message, Vec::new())
    });
    ParseFailure::new(kind, message, context).with_unmatched(unmatched)
}

fn describe(
    error: &clap::Error,
    stray_index: Option<usize>,
) -> Option<(FailureKind, String, Vec<String>)> {
    match error.kind() {
        ErrorKind::UnknownArgument => {
            let arg = context_string(error, ContextKind::InvalidArg)?;
            if arg.starts_with('-') {
                let message = format!("Unknown option: '{arg}'");
                Some((FailureKind::UnknownOption, message, vec![arg]))
            } else {
                let message = match stray_index {
                    Some(index) => format!("Unmatched argument at index {index}: '{arg}'"),
                    None => format!("Unmatched argument: '{arg}'"),
                };
                Some((FailureKind::UnmatchedArgument, message, vec![arg]))
            }
        }
        ErrorKind::InvalidSubcommand => {
            let name = context_string(error, ContextKind::InvalidSubcommand)?;
            let message = format!("Unknown subcommand: '{name}'");
            Some((FailureKind::UnknownSubcommand, message, vec![name]))
        }
        ErrorKind::MissingRequiredArgument => {
            let missing = context_strings(error, ContextKind::InvalidArg);
            if missing.is_empty() {
                return None;
            }
            let noun = if missing.iter().all(|m| m.starts_with('-')) {
                "option"
            } else {
                "parameter"
            };
            let plural = if missing.len() > 1 { "s" } else { "" };
            let quoted: Vec<String> = missing.iter().map(|m| format!("'{m}'")).collect();
            let message = format!("Missing required {noun}{plural}: {}", quoted.join(", "));
            Some((FailureKind::MissingArgument, message, Vec::new()))
        }
        ErrorKind::MissingSubcommand => Some((
            FailureKind::MissingSubcommand,
            "Missing required subcommand".to_string(),
            Vec::new(),
        )),
        ErrorKind::InvalidValue => {
            let arg = context_string(error, ContextKind::InvalidArg)?;
            let value = context_string(error, ContextKind::InvalidValue).unwrap_or_default();
            let valid = context_strings(error, ContextKind::ValidValue);
            let message = if value.is_empty() {
                format!("Missing value for option '{arg}'")
            } else if valid.is_empty() {
                format!("Invalid value for option '{arg}': '{value}'")
            } else {
                format!(
                    "Invalid value for option '{arg}': expected one of [{}] but was '{value}'",
                    valid.join(", ")
                )
            };
            Some((FailureKind::InvalidValue, message, Vec::new()))
        }
        ErrorKind::ValueValidation => {
            let arg = context_string(error, ContextKind::InvalidArg)?;
            let value = context_string(error, ContextKind::InvalidValue).unwrap_or_default();
            let mut message = format!("Invalid value for option '{arg}': '{value}'");
            if let Some(cause) = std::error::Error::source(error) {
                message.push_str(&format!(": {cause}"));
            }
            Some((FailureKind::InvalidValue, message, Vec::new()))
        }
        _ => None,
    }
}

/// The token clap could not place, if the error names one.
fn offending_token(error: &clap::Error) -> Option<String> {
    match error.kind() {
        ErrorKind::UnknownArgument => context_string(error, ContextKind::InvalidArg),
        ErrorKind::InvalidSubcommand => context_string(error, ContextKind::InvalidSubcommand),
        _ => None,
    }
}

/// Whether `token` is `offending`, allowing an `=value` suffix on options.
fn same_token(token: &str, offending: &str) -> bool {
    token == offending
        || (offending.starts_with('-')
            && token
                .strip_prefix(offending)
                .is_some_and(|rest| rest.starts_with('=')))
}

fn context_string(error: &clap::Error, kind: ContextKind) -> Option<String> {
    context_strings(error, kind).into_iter().next()
}

fn context_strings(error: &clap::Error, kind: ContextKind) -> Vec<String> {
    match error.get(kind) {
        Some(ContextValue::String(value)) => vec![value.clone()],
        Some(ContextValue::Strings(values)) => values.clone(),
        Some(ContextValue::StyledStr(value)) => vec![value.to_string()],
        Some(ContextValue::StyledStrs(values)) => values.iter().map(ToString::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Whether `token` is an option of `command` whose value is the next token.
fn option_consumes_next(command: &Command, token: &str) -> bool {
    if let Some(long) = token.strip_prefix("--") {
        if long.contains('=') {
            return false;
        }
        return command
            .get_arguments()
            .find(|arg| arg.get_long() == Some(long))
            .is_some_and(|arg| arg.get_action().takes_values());
    }

    // Short cluster such as `-vv` or `-t VALUE`; a value-taking flag
    // swallows the rest of the cluster, or the next token if it is last.
    let shorts: Vec<char> = token.trim_start_matches('-').chars().collect();
    for (i, short) in shorts.iter().enumerate() {
        let takes_value = command
            .get_arguments()
            .find(|arg| arg.get_short() == Some(*short))
            .is_some_and(|arg| arg.get_action().takes_values());
        if takes_value {
            return i == shorts.len() - 1;
        }
    }
    false
}

/// How many positional values `command` accepts.
fn positional_capacity(command: &Command) -> usize {
    command
        .get_positionals()
        .map(|arg| match arg.get_num_args() {
            Some(range) if range.max_values() > 1 => usize::MAX,
            _ if matches!(arg.get_action(), ArgAction::Append) => usize::MAX,
            _ => 1,
        })
        .fold(0, usize::saturating_add)
}

fn already_given(candidate: &str, args: &[String]) -> bool {
    args.iter().any(|arg| {
        arg == candidate
            || arg
                .strip_prefix(candidate)
                .is_some_and(|rest| rest.starts_with('='))
    })
}

// ============================================================================
// Tests
// ============================================================================
