//! Token vector parser.
//!
//! Grammar: a token starting with [`SWITCH_MARKER`] names a switch, and
//! every following token up to the next switch is its operand group.
//! There is no `--name=value` splitting, no short-flag clustering and no
//! end-of-options marker.
//!
//! The scan aborts on the first validation error, except for unknown
//! switches: those are remembered and reported after the scan (or dropped
//! in tolerant mode), so the remaining switches still get validated.

use tracing::{debug, warn};

use crate::argument::{Invocation, format_usages};
use crate::context::Context;
use crate::error::{CmdLineError, Result};
use crate::registry::Registry;

/// Prefix that marks a token as a switch.
pub const SWITCH_MARKER: &str = "--";

/// Parser behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop unknown switches instead of failing.
    pub ignore_unknown: bool,
}

impl ParseOptions {
    /// Unknown switches fail the parse.
    pub fn strict() -> Self {
        Self {
            ignore_unknown: false,
        }
    }

    /// Unknown switches are skipped, e.g. when another stage of the build
    /// owns them.
    pub fn tolerant() -> Self {
        Self {
            ignore_unknown: true,
        }
    }
}

/// Parses a token vector against a [`Registry`].
///
/// # Examples
///
/// ```
/// use pdbuild_cmdline::{Argument, ParseOptions, Parser, Registry, Value};
///
/// let mut registry = Registry::new();
/// registry.add_value(Value::new("dir", "Workspace.", "General:"));
/// registry.add_argument(Argument::text("dir", "workspace-dir", "<dir>"));
///
/// let context = Parser::new(&registry, ["--workspace-dir", "/a"]).parse().unwrap();
/// assert_eq!(context.resolve_text("dir").as_deref(), Some("/a"));
///
/// let err = Parser::new(&registry, ["--other", "--workspace-dir", "/a"])
///     .parse()
///     .unwrap_err();
/// assert_eq!(err.to_string(), "command '--other' @0 is unknown");
///
/// let context = Parser::new(&registry, ["--other", "--workspace-dir", "/a"])
///     .with_options(ParseOptions::tolerant())
///     .parse()
///     .unwrap();
/// assert!(context.is_set("dir"));
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'r> {
    registry: &'r Registry,
    args: Vec<String>,
    options: ParseOptions,
}

impl<'r> Parser<'r> {
    pub fn new<I, S>(registry: &'r Registry, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            registry,
            args: args.into_iter().map(Into::into).collect(),
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs the scan and the post-scan checks on a fresh context.
    ///
    /// # Errors
    ///
    /// - [`UnexpectedOperand`](CmdLineError::UnexpectedOperand) for an
    ///   operand before the first switch.
    /// - Any error of [`Argument::parse`](crate::Argument::parse).
    /// - [`MissingCommand`](CmdLineError::MissingCommand) for the first
    ///   required value left unset.
    /// - [`UnknownCommand`](CmdLineError::UnknownCommand) for the first
    ///   unknown switch, unless unknown switches are ignored.
    pub fn parse(&self) -> Result<Context<'r>> {
        let mut context = self.registry.create_context();
        let mut first_unknown = None;
        let mut index = 0;

        while index < self.args.len() {
            let token = &self.args[index];
            let Some(command) = token.strip_prefix(SWITCH_MARKER) else {
                return Err(CmdLineError::UnexpectedOperand {
                    index,
                    token: token.clone(),
                    args: self.args.clone(),
                });
            };

            let end = self.operand_group_end(index);
            let invocation = Invocation {
                index,
                args: &self.args,
                operands: &self.args[index + 1..end],
            };

            match self.registry.find_argument(command) {
                Some(argument) => {
                    debug!(
                        command,
                        index,
                        operands = invocation.operands.len(),
                        "dispatching switch"
                    );
                    argument.parse(&mut context, &invocation)?;
                }
                None => {
                    debug!(command, index, "unknown switch");
                    first_unknown.get_or_insert(index);
                }
            }

            index = end;
        }

        self.check_required(&context)?;

        if let Some(index) = first_unknown {
            let token = &self.args[index];
            if !self.options.ignore_unknown {
                return Err(CmdLineError::UnknownCommand {
                    index,
                    token: token.clone(),
                    args: self.args.clone(),
                });
            }
            warn!(token = token.as_str(), index, "ignoring unknown switch");
        }

        Ok(context)
    }

    /// Index one past the operand group of the switch at `index`.
    fn operand_group_end(&self, index: usize) -> usize {
        self.args[index + 1..]
            .iter()
            .position(|arg| arg.starts_with(SWITCH_MARKER))
            .map_or(self.args.len(), |offset| index + 1 + offset)
    }

    fn check_required(&self, context: &Context<'_>) -> Result<()> {
        let missing = context
            .values()
            .iter()
            .find(|value| value.is_required() && !value.is_set());

        match missing {
            Some(value) => Err(CmdLineError::MissingCommand {
                value: value.identifier().to_string(),
                commands: self
                    .registry
                    .arguments_for(value.identifier())
                    .map(|argument| argument.usage())
                    .collect(),
                args: self.args.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Parses `args` in one call. See [`Parser::parse`].
pub fn parse<I, S>(registry: &Registry, args: I, options: ParseOptions) -> Result<Context<'_>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Parser::new(registry, args).with_options(options).parse()
}

/// Comma-separated usage of every switch bound to `identifier`.
pub fn usage_of(registry: &Registry, identifier: &str) -> String {
    format_usages(registry.arguments_for(identifier))
}
