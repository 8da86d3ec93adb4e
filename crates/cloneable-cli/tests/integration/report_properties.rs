//! Properties of the short parse-failure report.

use std::io::Write;

use cloneable_cli::report::{
    CommandContext, ExitCodeMapper, FailureKind, ParseFailure, ShortErrorReporter,
};
use proptest::prelude::*;

/// Context whose answers are fixed up front.
struct FixedContext {
    name: String,
    suggestions: Vec<String>,
    invalid_input_code: i32,
    out: Vec<u8>,
}

impl FixedContext {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            suggestions: Vec::new(),
            invalid_input_code: 2,
            out: Vec::new(),
        }
    }
}

struct Constant(i32);

impl ExitCodeMapper for Constant {
    fn exit_code(&self, _failure: &ParseFailure<'_>) -> i32 {
        self.0
    }
}

impl CommandContext for FixedContext {
    fn qualified_name(&self) -> String {
        self.name.clone()
    }

    fn synopsis(&self) -> String {
        format!("Usage: {} [OPTIONS]\n", self.name)
    }

    fn suggestions_for(&self, _failure: &ParseFailure<'_>, _args: &[String]) -> Vec<String> {
        self.suggestions.clone()
    }

    fn exit_code_mapper(&self) -> Option<&dyn ExitCodeMapper> {
        None
    }

    fn exit_code_on_invalid_input(&self) -> i32 {
        self.invalid_input_code
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

/// Same as [`FixedContext`] but always maps through [`Constant`].
struct MappedContext {
    inner: FixedContext,
    mapper: Constant,
}

impl CommandContext for MappedContext {
    fn qualified_name(&self) -> String {
        self.inner.qualified_name()
    }

    fn synopsis(&self) -> String {
        self.inner.synopsis()
    }

    fn suggestions_for(&self, failure: &ParseFailure<'_>, args: &[String]) -> Vec<String> {
        self.inner.suggestions_for(failure, args)
    }

    fn exit_code_mapper(&self) -> Option<&dyn ExitCodeMapper> {
        Some(&self.mapper)
    }

    fn exit_code_on_invalid_input(&self) -> i32 {
        self.inner.exit_code_on_invalid_input()
    }

    fn err(&mut self) -> &mut dyn Write {
        self.inner.err()
    }
}

fn command_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9-]{0,8}", 1..4).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn test_first_line_is_message(message in "[^\r\n]{1,80}", name in command_name()) {
        let mut ctx = FixedContext::new(&name);
        let mut failure = ParseFailure::new(FailureKind::Other, message.clone(), &mut ctx);
        ShortErrorReporter::new().handle(&mut failure, &[]).unwrap();

        let output = String::from_utf8(ctx.out).unwrap();
        prop_assert_eq!(output.split('\n').next().unwrap(), message.as_str());
    }

    #[test]
    fn test_last_line_is_help_hint(message in "[^\r\n]{1,80}", name in command_name()) {
        let mut ctx = FixedContext::new(&name);
        ctx.suggestions = vec!["Possible solutions: --x".to_string()];
        let mut failure = ParseFailure::new(FailureKind::UnknownOption, message, &mut ctx)
            .with_unmatched(["--y"]);
        ShortErrorReporter::new().handle(&mut failure, &[]).unwrap();

        let output = String::from_utf8(ctx.out).unwrap();
        let expected = format!("Try '{name} --help' for more information.");
        prop_assert_eq!(output.lines().last().unwrap(), expected.as_str());
        prop_assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_no_suggestions_without_unmatched(kind in prop_oneof![
        Just(FailureKind::MissingArgument),
        Just(FailureKind::MissingSubcommand),
        Just(FailureKind::InvalidValue),
        Just(FailureKind::Other),
    ]) {
        let mut ctx = FixedContext::new("tool");
        ctx.suggestions = vec!["SUGGESTION".to_string()];
        let mut failure = ParseFailure::new(kind, "bad", &mut ctx);
        ShortErrorReporter::new().handle(&mut failure, &[]).unwrap();

        let output = String::from_utf8(ctx.out).unwrap();
        prop_assert!(!output.contains("SUGGESTION"));
        prop_assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn test_default_code_without_mapper(code in 0i32..=255) {
        let mut ctx = FixedContext::new("tool");
        ctx.invalid_input_code = code;
        let mut failure = ParseFailure::new(FailureKind::Other, "bad", &mut ctx);
        let resolved = ShortErrorReporter::new().handle(&mut failure, &[]).unwrap();
        prop_assert_eq!(resolved, code);
    }

    #[test]
    fn test_mapper_wins(default in 0i32..=255, mapped in 0i32..=255) {
        let mut inner = FixedContext::new("tool");
        inner.invalid_input_code = default;
        let mut ctx = MappedContext { inner, mapper: Constant(mapped) };
        let mut failure = ParseFailure::new(FailureKind::Other, "bad", &mut ctx);
        let resolved = ShortErrorReporter::new().handle(&mut failure, &[]).unwrap();
        prop_assert_eq!(resolved, mapped);
    }
}
