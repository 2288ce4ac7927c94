//! Error types for command line parsing.
//!
//! Every user-facing variant carries the full token vector and the index of
//! the offending switch, so callers can point at the exact token. The
//! `Display` impl only reads those fields.

use thiserror::Error;

/// Errors raised while parsing a token vector or accessing a
/// [`Context`](crate::Context).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CmdLineError {
    /// An operand appeared before any switch.
    #[error("argument '{token}' @{index} not expected")]
    UnexpectedOperand {
        index: usize,
        token: String,
        args: Vec<String>,
    },

    /// No binding matches the switch. Deferred to the end of the scan and
    /// dropped in tolerant mode.
    #[error("command '{token}' @{index} is unknown")]
    UnknownCommand {
        index: usize,
        token: String,
        args: Vec<String>,
    },

    /// The operand group has the wrong length for the binding.
    #[error("command '--{command}' @{index} expected {expected} arguments but got {actual}")]
    ArityMismatch {
        index: usize,
        args: Vec<String>,
        command: String,
        expected: usize,
        actual: usize,
    },

    /// A unique value was set a second time.
    #[error("command '--{command}' @{index} can not be set twice")]
    DuplicateCommand {
        index: usize,
        args: Vec<String>,
        command: String,
    },

    /// The operand is not one of the value's options.
    #[error("command '--{command}' has no option '{option}'")]
    InvalidOption {
        index: usize,
        args: Vec<String>,
        command: String,
        option: String,
    },

    /// A required value was never set. `commands` lists every switch bound
    /// to it, with operand placeholders.
    #[error("command '{}' is expected to be set", .commands.join(", "))]
    MissingCommand {
        value: String,
        commands: Vec<String>,
        args: Vec<String>,
    },

    /// A binding or accessor names a value the registry does not know.
    /// This is a configuration bug, not a user error.
    #[error("command line key {identifier} is unknown")]
    UnknownValue { identifier: String },
}

impl CmdLineError {
    /// Index of the offending token, when the error points at one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::UnexpectedOperand { index, .. }
            | Self::UnknownCommand { index, .. }
            | Self::ArityMismatch { index, .. }
            | Self::DuplicateCommand { index, .. }
            | Self::InvalidOption { index, .. } => Some(*index),
            Self::MissingCommand { .. } | Self::UnknownValue { .. } => None,
        }
    }

    /// The full token vector that was parsed.
    pub fn args(&self) -> &[String] {
        match self {
            Self::UnexpectedOperand { args, .. }
            | Self::UnknownCommand { args, .. }
            | Self::ArityMismatch { args, .. }
            | Self::DuplicateCommand { args, .. }
            | Self::InvalidOption { args, .. }
            | Self::MissingCommand { args, .. } => args,
            Self::UnknownValue { .. } => &[],
        }
    }

    /// Whether the parser can skip this error in tolerant mode.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownCommand { .. })
    }

    /// Whether the error comes from the token vector rather than from the
    /// registry setup.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::UnknownValue { .. })
    }
}

/// Convenience alias for results with [`CmdLineError`].
pub type Result<T> = std::result::Result<T, CmdLineError>;
