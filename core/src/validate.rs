//! Registration-time checks.
//!
//! The parser tolerates an inconsistent registry (the first binding of a
//! spelling wins, a binding to an unknown value fails only when used).
//! [`Registry::validate`] reports those problems up front without changing
//! any behavior.
//!
//! # Examples
//!
//! ```
//! use pdbuild_cmdline::{Argument, Registry, RegistryIssue, Value};
//!
//! let mut registry = Registry::new();
//! registry.add_value(Value::new("dir", "Workspace.", "General:"));
//! registry.add_argument(Argument::text("dir", "workspace-dir", "<dir>"));
//! assert!(registry.validate().is_empty());
//!
//! registry.add_argument(Argument::text("dir", "workspace-dir", "<path>"));
//! assert_eq!(
//!     registry.validate(),
//!     vec![RegistryIssue::DuplicateCommand("workspace-dir".to_string())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::parser::SWITCH_MARKER;
use crate::registry::Registry;

/// Structural problem of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryIssue {
    /// A binding has an empty spelling and matches the bare marker.
    #[error("switch bound to value '{0}' has an empty name")]
    EmptyCommand(String),
    /// A binding refers to a value that was never registered.
    #[error("switch '--{command}' is bound to unknown value '{value}'")]
    UnboundValue { command: String, value: String },
    /// A later binding reuses a spelling and can never match.
    #[error("switch '--{0}' is registered more than once")]
    DuplicateCommand(String),
    /// A spelling starts with the marker itself, e.g. `--verbose` as a
    /// command name, and only matches `----verbose`.
    #[error("switch '{0}' must be registered without the leading '{SWITCH_MARKER}'")]
    MarkedCommand(String),
}

impl Registry {
    /// Lists every structural problem, in binding order.
    pub fn validate(&self) -> Vec<RegistryIssue> {
        let mut issues = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for argument in self.arguments() {
            let command = argument.command();

            if command.trim().is_empty() {
                issues.push(RegistryIssue::EmptyCommand(
                    argument.value_binding().to_string(),
                ));
            } else if command.starts_with(SWITCH_MARKER) {
                issues.push(RegistryIssue::MarkedCommand(command.to_string()));
            }

            if !seen.insert(command) {
                issues.push(RegistryIssue::DuplicateCommand(command.to_string()));
            }

            if self.value(argument.value_binding()).is_none() {
                issues.push(RegistryIssue::UnboundValue {
                    command: command.to_string(),
                    value: argument.value_binding().to_string(),
                });
            }
        }

        issues
    }
}
