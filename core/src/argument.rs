//! Switch bindings.
//!
//! An [`Argument`] maps one switch spelling (without the leading `--`) to
//! a value identifier. The binding decides how many operands the switch
//! takes and what it writes into the value.

use crate::context::Context;
use crate::error::{CmdLineError, Result};
use crate::value::{Data, Value};

/// Mutation rule of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ArgumentKind {
    /// Takes no operand and writes a fixed flag.
    Flag { data: bool },
    /// Takes exactly one operand and writes it as text.
    Text { placeholder: String },
}

/// Where a switch occurred in the token vector.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// Index of the switch token.
    pub index: usize,
    /// Full token vector.
    pub args: &'a [String],
    /// Operand group following the switch.
    pub operands: &'a [String],
}

/// Binding of a switch spelling to a value.
///
/// # Examples
///
/// ```
/// use pdbuild_cmdline::Argument;
///
/// let workspace = Argument::text("general.workspace-dir", "workspace-dir", "<dir>");
/// assert_eq!(workspace.arity(), 1);
/// assert_eq!(workspace.usage(), "--workspace-dir <dir>");
///
/// let help = Argument::flag("general.help", "help");
/// assert_eq!(help.arity(), 0);
/// assert_eq!(help.usage(), "--help");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    command: String,
    value: String,
    kind: ArgumentKind,
}

impl Argument {
    /// Flag that sets `value` to `true`.
    pub fn flag(value: &str, command: &str) -> Self {
        Self::flag_with(value, command, true)
    }

    /// Flag that sets `value` to `data`.
    pub fn flag_with(value: &str, command: &str, data: bool) -> Self {
        Self {
            command: command.to_string(),
            value: value.to_string(),
            kind: ArgumentKind::Flag { data },
        }
    }

    /// Single-operand switch; `placeholder` names the operand in help.
    pub fn text(value: &str, command: &str, placeholder: &str) -> Self {
        Self {
            command: command.to_string(),
            value: value.to_string(),
            kind: ArgumentKind::Text {
                placeholder: placeholder.to_string(),
            },
        }
    }

    /// Switch spelling without the marker.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Identifier of the bound value.
    pub fn value_binding(&self) -> &str {
        &self.value
    }

    /// Number of operands the switch takes.
    pub fn arity(&self) -> usize {
        match self.kind {
            ArgumentKind::Flag { .. } => 0,
            ArgumentKind::Text { .. } => 1,
        }
    }

    /// Operand placeholder for help output; empty for flags.
    pub fn describe(&self) -> &str {
        match &self.kind {
            ArgumentKind::Flag { .. } => "",
            ArgumentKind::Text { placeholder } => placeholder,
        }
    }

    /// `--command` followed by the placeholder, if any.
    pub fn usage(&self) -> String {
        match self.describe() {
            "" => format!("--{}", self.command),
            placeholder => format!("--{} {placeholder}", self.command),
        }
    }

    /// Validates one occurrence of the switch and writes the bound value in
    /// `context`.
    ///
    /// # Errors
    ///
    /// - [`UnknownValue`](CmdLineError::UnknownValue) if the context has no
    ///   value for this binding.
    /// - [`DuplicateCommand`](CmdLineError::DuplicateCommand) if the value
    ///   is unique and already set.
    /// - [`ArityMismatch`](CmdLineError::ArityMismatch) if the operand
    ///   count differs from [`arity`](Self::arity).
    /// - [`InvalidOption`](CmdLineError::InvalidOption) if the value has
    ///   options and the operand is none of them.
    pub fn parse(&self, context: &mut Context<'_>, invocation: &Invocation<'_>) -> Result<()> {
        let defaults = context.registry().defaults();
        let value = context
            .value_mut(&self.value)
            .ok_or_else(|| CmdLineError::UnknownValue {
                identifier: self.value.clone(),
            })?;

        let data = self.validate(value, invocation)?;
        value.on_parse(data, defaults);
        Ok(())
    }

    fn validate(&self, value: &Value, invocation: &Invocation<'_>) -> Result<Data> {
        if value.is_unique() && value.is_set() {
            return Err(CmdLineError::DuplicateCommand {
                index: invocation.index,
                args: invocation.args.to_vec(),
                command: self.command.clone(),
            });
        }

        if invocation.operands.len() != self.arity() {
            return Err(CmdLineError::ArityMismatch {
                index: invocation.index,
                args: invocation.args.to_vec(),
                command: self.command.clone(),
                expected: self.arity(),
                actual: invocation.operands.len(),
            });
        }

        match &self.kind {
            ArgumentKind::Flag { data } => Ok(Data::Flag(*data)),
            ArgumentKind::Text { .. } => {
                let operand = &invocation.operands[0];
                if let Some(options) = value.options() {
                    if !options.iter().any(|option| &option.literal == operand) {
                        return Err(CmdLineError::InvalidOption {
                            index: invocation.index,
                            args: invocation.args.to_vec(),
                            command: self.command.clone(),
                            option: operand.clone(),
                        });
                    }
                }
                Ok(Data::Text(operand.clone()))
            }
        }
    }
}

/// Comma-separated usage of several bindings, e.g.
/// `--workspace-dir <dir>, --ws <dir>`.
pub(crate) fn format_usages<'a>(arguments: impl IntoIterator<Item = &'a Argument>) -> String {
    arguments
        .into_iter()
        .map(Argument::usage)
        .collect::<Vec<_>>()
        .join(", ")
}
