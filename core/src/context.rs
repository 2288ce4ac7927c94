//! Per-parse working copies of a registry's values.

use serde_json::{Map, Value as JsonValue};

use crate::error::{CmdLineError, Result};
use crate::registry::Registry;
use crate::value::{Data, Value};

/// Working copies of every registered value for one parse.
///
/// Created by [`Registry::create_context`]. The context owns its values
/// and borrows bindings and shared defaults from the registry, so any
/// number of contexts can be built from one registry.
#[derive(Debug)]
pub struct Context<'r> {
    registry: &'r Registry,
    values: Vec<Value>,
}

impl<'r> Context<'r> {
    pub(crate) fn new(registry: &'r Registry, values: Vec<Value>) -> Self {
        Self { registry, values }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Working copies in registration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Identifiers in registration order.
    pub fn keys(&self) -> Vec<&str> {
        self.values.iter().map(Value::identifier).collect()
    }

    pub fn value(&self, identifier: &str) -> Option<&Value> {
        self.registry
            .position(identifier)
            .and_then(|i| self.values.get(i))
    }

    pub(crate) fn value_mut(&mut self, identifier: &str) -> Option<&mut Value> {
        self.registry
            .position(identifier)
            .and_then(|i| self.values.get_mut(i))
    }

    /// Parsed data, or the default when the value was not set. `None` for
    /// unknown identifiers and values without default.
    pub fn resolve(&self, identifier: &str) -> Option<Data> {
        self.value(identifier)?.get(self.registry.defaults())
    }

    /// Resolved text, if the value holds text.
    pub fn resolve_text(&self, identifier: &str) -> Option<String> {
        match self.resolve(identifier)? {
            Data::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Resolved flag; `false` unless the value holds `true`.
    pub fn resolve_flag(&self, identifier: &str) -> bool {
        matches!(self.resolve(identifier), Some(Data::Flag(true)))
    }

    /// Resolved list; empty unless the value holds a list.
    pub fn resolve_list(&self, identifier: &str) -> Vec<String> {
        match self.resolve(identifier) {
            Some(Data::List(list)) => list,
            _ => Vec::new(),
        }
    }

    /// Whether the value was set. `false` for unknown identifiers.
    pub fn is_set(&self, identifier: &str) -> bool {
        self.value(identifier).is_some_and(Value::is_set)
    }

    /// Stores `data` in the value and marks it set.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownValue`](CmdLineError::UnknownValue) for an
    /// unregistered identifier.
    pub fn overwrite(&mut self, identifier: &str, data: impl Into<Data>) -> Result<()> {
        self.lookup_mut(identifier)?.overwrite(data.into());
        Ok(())
    }

    /// Changes the default of a value, see [`Value::set_default`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownValue`](CmdLineError::UnknownValue) for an
    /// unregistered identifier.
    pub fn set_default(
        &mut self,
        identifier: &str,
        override_prototype: bool,
        data: Option<Data>,
    ) -> Result<()> {
        let registry = self.registry;
        self.lookup_mut(identifier)?
            .set_default(override_prototype, data, registry.defaults());
        Ok(())
    }

    /// Every resolved value as a JSON object keyed by identifier. Values
    /// without data map to `null`.
    pub fn snapshot(&self) -> JsonValue {
        let mut map = Map::new();
        for value in &self.values {
            let data = value.get(self.registry.defaults());
            let json = serde_json::to_value(&data).unwrap_or(JsonValue::Null);
            map.insert(value.identifier().to_string(), json);
        }
        JsonValue::Object(map)
    }

    fn lookup_mut(&mut self, identifier: &str) -> Result<&mut Value> {
        self.value_mut(identifier)
            .ok_or_else(|| CmdLineError::UnknownValue {
                identifier: identifier.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_value(Value::new("flag", "", "cat").with_default(false));
        registry.add_value(Value::new("dir", "", "cat").with_default("/tmp/ws"));
        registry.add_value(Value::new("none", "", "cat"));
        registry.add_value(Value::list("list", "", "cat", vec!["a".into()]));
        registry
    }

    #[test]
    fn test_new_context_resolves_defaults_unset() {
        let registry = registry();
        let context = registry.create_context();
        for key in context.keys() {
            assert!(!context.is_set(key));
            assert_eq!(context.resolve(key), registry.resolve(key));
        }
        assert!(!context.resolve_flag("flag"));
        assert_eq!(context.resolve_text("dir").as_deref(), Some("/tmp/ws"));
        assert_eq!(context.resolve("none"), None);
        assert_eq!(context.resolve_list("list"), vec!["a"]);
    }

    #[test]
    fn test_contexts_are_independent() {
        let registry = registry();
        let mut first = registry.create_context();
        let second = registry.create_context();
        first.overwrite("dir", "/other").unwrap();
        assert!(first.is_set("dir"));
        assert!(!second.is_set("dir"));
        assert_eq!(second.resolve_text("dir").as_deref(), Some("/tmp/ws"));
        assert!(!registry.value("dir").unwrap().is_set());
    }

    #[test]
    fn test_overwrite_unknown_value_fails() {
        let registry = registry();
        let mut context = registry.create_context();
        assert_eq!(
            context.overwrite("missing", "x"),
            Err(CmdLineError::UnknownValue {
                identifier: "missing".into()
            })
        );
        assert!(!context.is_set("missing"));
        assert_eq!(context.resolve("missing"), None);
    }

    #[test]
    fn test_set_default_override_and_detach() {
        let registry = registry();
        let mut context = registry.create_context();

        context
            .set_default("dir", true, Some(Data::from("/shared")))
            .unwrap();
        assert_eq!(registry.resolve("dir"), Some(Data::from("/shared")));

        context
            .set_default("dir", false, Some(Data::from("/local")))
            .unwrap();
        assert_eq!(context.resolve_text("dir").as_deref(), Some("/local"));
        assert_eq!(registry.resolve("dir"), Some(Data::from("/shared")));
    }

    #[test]
    fn test_snapshot() {
        let registry = registry();
        let mut context = registry.create_context();
        context.overwrite("flag", true).unwrap();
        let snapshot = context.snapshot();
        assert_eq!(snapshot["flag"], serde_json::json!(true));
        assert_eq!(snapshot["dir"], serde_json::json!("/tmp/ws"));
        assert_eq!(snapshot["none"], serde_json::Value::Null);
        assert_eq!(snapshot["list"], serde_json::json!(["a"]));
    }
}
