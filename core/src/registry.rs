//! Catalog of value prototypes and switch bindings.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::argument::Argument;
use crate::context::Context;
use crate::error::{CmdLineError, Result};
use crate::value::{Data, Defaults, Value};

/// Value prototypes and bindings, built once and shared by every parse.
///
/// Values keep their registration order, which is the order used by help
/// output and by the required-value check. Bindings are matched in
/// registration order; the first binding with a matching spelling wins.
///
/// # Examples
///
/// ```
/// use pdbuild_cmdline::{Argument, Registry, Value};
///
/// let mut registry = Registry::new();
/// registry.add_value(Value::new("general.help", "Show help.", "General:").with_default(false));
/// registry.add_argument(Argument::flag("general.help", "help"));
///
/// let context = registry.create_context();
/// assert!(!context.is_set("general.help"));
/// assert!(registry.validate().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    values: Vec<Value>,
    index: HashMap<String, usize>,
    defaults: Defaults,
    arguments: Vec<Argument>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value prototype.
    ///
    /// Returns `false` and keeps the existing prototype when the identifier
    /// is already registered.
    pub fn add_value(&mut self, mut value: Value) -> bool {
        if self.index.contains_key(value.identifier()) {
            debug!(identifier = value.identifier(), "value already registered");
            return false;
        }
        value.attach(&mut self.defaults);
        self.index
            .insert(value.identifier().to_string(), self.values.len());
        self.values.push(value);
        true
    }

    /// Appends a binding. A reused spelling is only logged, the earlier
    /// binding keeps matching; see [`validate`](Self::validate).
    pub fn add_argument(&mut self, argument: Argument) {
        if self.find_argument(argument.command()).is_some() {
            warn!(
                command = argument.command(),
                "switch registered twice, the first binding wins"
            );
        }
        self.arguments.push(argument);
    }

    /// Prototype registered under `identifier`.
    pub fn value(&self, identifier: &str) -> Option<&Value> {
        self.position(identifier).map(|i| &self.values[i])
    }

    /// Prototypes in registration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Identifiers in registration order.
    pub fn value_keys(&self) -> Vec<&str> {
        self.values.iter().map(Value::identifier).collect()
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// First binding spelled `command`.
    pub fn find_argument(&self, command: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|argument| argument.command() == command)
    }

    /// Bindings of the value `identifier`, in registration order.
    pub fn arguments_for<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a Argument> {
        self.arguments
            .iter()
            .filter(move |argument| argument.value_binding() == identifier)
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Current default of the prototype `identifier`.
    pub fn resolve(&self, identifier: &str) -> Option<Data> {
        self.value(identifier)?.default_value(&self.defaults)
    }

    /// Replaces the shared default of a prototype. Contexts see the new
    /// default for every value they have not set.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownValue`](CmdLineError::UnknownValue) for an
    /// unregistered identifier.
    pub fn set_default(&self, identifier: &str, data: Option<Data>) -> Result<()> {
        let value = self.value(identifier).ok_or_else(|| CmdLineError::UnknownValue {
            identifier: identifier.to_string(),
        })?;
        if let Some(slot) = value.slot() {
            self.defaults.store(slot, data);
        }
        Ok(())
    }

    /// Creates a fresh working copy of every prototype.
    pub fn create_context(&self) -> Context<'_> {
        debug!(values = self.values.len(), "creating parser context");
        Context::new(self, self.values.iter().map(Value::create).collect())
    }

    pub(crate) fn position(&self, identifier: &str) -> Option<usize> {
        self.index.get(identifier).copied()
    }
}
