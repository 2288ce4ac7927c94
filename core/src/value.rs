//! Value model: one typed storage cell per logical parameter.
//!
//! A [`Value`] registered in a [`Registry`](crate::Registry) is a prototype.
//! Its default lives in the registry's [`Defaults`] table and every working
//! copy made by [`Value::create`] points at the same slot, so changing the
//! prototype default is visible to all copies made afterwards.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Data held by a value.
///
/// # Examples
///
/// ```
/// use pdbuild_cmdline::Data;
///
/// assert_eq!(Data::from(true).as_flag(), Some(true));
/// assert_eq!(Data::from("fetch").as_text(), Some("fetch"));
/// assert_eq!(Data::from(vec!["a".to_string()]).to_string(), "[a]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Data {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl Data {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Text(text) => f.write_str(text),
            Self::List(list) => write!(f, "[{}]", list.join(", ")),
        }
    }
}

impl From<bool> for Data {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for Data {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Data {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for Data {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

/// One accepted operand of a restricted single-value [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueOption {
    /// Exact operand spelling.
    pub literal: String,
    pub description: String,
}

impl ValueOption {
    pub fn new(literal: &str, description: &str) -> Self {
        Self {
            literal: literal.to_string(),
            description: description.to_string(),
        }
    }
}

/// Storage shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Holds the last parsed datum.
    Single,
    /// Accumulates strings with the `=`, `=X`, `+X`, `X` grammar.
    List,
}

/// Where a value's default comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DefaultSource {
    /// Owned by this instance.
    Literal(Option<Data>),
    /// Slot in a [`Defaults`] table shared with the prototype.
    Prototype(usize),
}

/// Shared prototype defaults, addressed by slot.
///
/// Owned by the [`Registry`](crate::Registry). Slots are behind locks so
/// contexts on different threads can resolve defaults while one of them
/// overrides a prototype default.
#[derive(Debug, Default)]
pub struct Defaults {
    slots: Vec<RwLock<Option<Data>>>,
}

impl Defaults {
    pub(crate) fn insert(&mut self, data: Option<Data>) -> usize {
        self.slots.push(RwLock::new(data));
        self.slots.len() - 1
    }

    /// Current default of `slot`; `None` for unknown slots.
    pub fn load(&self, slot: usize) -> Option<Data> {
        let lock = self.slots.get(slot)?;
        lock.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn store(&self, slot: usize, data: Option<Data>) {
        if let Some(lock) = self.slots.get(slot) {
            *lock.write().unwrap_or_else(PoisonError::into_inner) = data;
        }
    }
}

/// A named logical parameter.
///
/// Values do not validate what they receive; legality checks belong to
/// the [`Argument`](crate::Argument) that writes them.
///
/// # Examples
///
/// ```
/// use pdbuild_cmdline::{Defaults, Value, ValueOption};
///
/// let mode = Value::new("librarian.mode", "Checkout strategy.", "General:")
///     .with_default("update")
///     .with_options(vec![
///         ValueOption::new("fetch", "fetch missing dependencies."),
///         ValueOption::new("update", "update clean repositories."),
///     ]);
///
/// let defaults = Defaults::default();
/// assert_eq!(mode.get(&defaults).unwrap().as_text(), Some("update"));
/// assert!(mode.description().ends_with("update: update clean repositories."));
/// ```
#[derive(Debug, Clone)]
pub struct Value {
    identifier: String,
    description: String,
    category: String,
    kind: ValueKind,
    required: bool,
    unique: bool,
    options: Option<Vec<ValueOption>>,
    data: Option<Data>,
    is_set: bool,
    default: DefaultSource,
}

impl Value {
    /// Creates a single-value parameter: unique, optional, no default.
    pub fn new(identifier: &str, description: &str, category: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            kind: ValueKind::Single,
            required: false,
            unique: true,
            options: None,
            data: None,
            is_set: false,
            default: DefaultSource::Literal(None),
        }
    }

    /// Creates a list parameter starting from `initial`. Lists are never
    /// unique.
    pub fn list(identifier: &str, description: &str, category: &str, initial: Vec<String>) -> Self {
        Self {
            kind: ValueKind::List,
            unique: false,
            default: DefaultSource::Literal(Some(Data::List(initial))),
            ..Self::new(identifier, description, category)
        }
    }

    pub fn with_default(mut self, data: impl Into<Data>) -> Self {
        self.default = DefaultSource::Literal(Some(data.into()));
        self
    }

    /// Marks the value as required: parsing fails while it is unset.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allows the value to be set more than once.
    pub fn allow_repeat(mut self) -> Self {
        self.unique = false;
        self
    }

    /// Restricts single-value operands to the given options.
    pub fn with_options(mut self, options: Vec<ValueOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Creates an unset working copy that resolves its default through
    /// this value.
    pub fn create(&self) -> Self {
        Self {
            data: None,
            is_set: false,
            ..self.clone()
        }
    }

    /// Moves a literal default into `defaults` and links this value to it.
    pub(crate) fn attach(&mut self, defaults: &mut Defaults) {
        if let DefaultSource::Literal(data) = &mut self.default {
            let slot = defaults.insert(data.take());
            self.default = DefaultSource::Prototype(slot);
        }
    }

    /// Shared default slot, for values attached to a registry.
    pub(crate) fn slot(&self) -> Option<usize> {
        match self.default {
            DefaultSource::Prototype(slot) => Some(slot),
            DefaultSource::Literal(_) => None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Accepted operands, or `None` when any operand is accepted.
    pub fn options(&self) -> Option<&[ValueOption]> {
        self.options.as_deref()
    }

    /// True once the parser (or an overwrite) stored data.
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// Help text: the description, followed by one line per option.
    pub fn description(&self) -> String {
        let Some(options) = &self.options else {
            return self.description.clone();
        };
        let mut text = format!("{}\n", self.description);
        for option in options {
            text.push_str(&format!("\n{}: {}", option.literal, option.description));
        }
        text
    }

    /// Resolved default, following the prototype link.
    pub fn default_value(&self, defaults: &Defaults) -> Option<Data> {
        match &self.default {
            DefaultSource::Literal(data) => data.clone(),
            DefaultSource::Prototype(slot) => defaults.load(*slot),
        }
    }

    /// Parsed data if set, else the resolved default.
    pub fn get(&self, defaults: &Defaults) -> Option<Data> {
        if self.is_set {
            self.data.clone()
        } else {
            self.default_value(defaults)
        }
    }

    /// Changes the default.
    ///
    /// With `override_prototype` and a prototype link, the shared default
    /// changes for every copy. Otherwise this value gets its own default
    /// and stops following the prototype.
    pub fn set_default(&mut self, override_prototype: bool, data: Option<Data>, defaults: &Defaults) {
        match self.default {
            DefaultSource::Prototype(slot) if override_prototype => defaults.store(slot, data),
            _ => self.default = DefaultSource::Literal(data),
        }
    }

    /// Stores parsed data and marks the value set.
    ///
    /// List values apply the list grammar to their current contents
    /// (the resolved default while unset): `=` clears, `=X` replaces with
    /// `[X]`, `+X` prepends `X`, anything else is appended. A `Data::List`
    /// replaces the contents.
    ///
    /// Starting an unset list from its default is intended: `--path x` on a
    /// list defaulting to `[a]` yields `[a, x]`, and `=X` or `=` drop the
    /// default explicitly.
    pub fn on_parse(&mut self, data: Data, defaults: &Defaults) {
        let data = match (self.kind, data) {
            (ValueKind::Single, data) | (ValueKind::List, data @ Data::List(_)) => data,
            (ValueKind::List, data) => {
                let mut entries = match self.get(defaults) {
                    Some(Data::List(entries)) => entries,
                    _ => Vec::new(),
                };
                apply_list_token(&mut entries, &data.to_string());
                Data::List(entries)
            }
        };
        self.data = Some(data);
        self.is_set = true;
    }

    /// Replaces the data without any list grammar and marks the value set.
    pub fn overwrite(&mut self, data: Data) {
        self.data = Some(data);
        self.is_set = true;
    }
}

fn apply_list_token(entries: &mut Vec<String>, token: &str) {
    if token == "=" {
        entries.clear();
    } else if let Some(entry) = token.strip_prefix('=') {
        *entries = vec![entry.to_string()];
    } else if let Some(entry) = token.strip_prefix('+') {
        entries.insert(0, entry.to_string());
    } else {
        entries.push(token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Data {
        Data::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_new_value_defaults() {
        let value = Value::new("a", "desc", "cat");
        assert!(value.is_unique());
        assert!(!value.is_required());
        assert!(!value.is_set());
        assert_eq!(value.kind(), ValueKind::Single);
        assert_eq!(value.get(&Defaults::default()), None);
    }

    #[test]
    fn test_on_parse_sets_single_value() {
        let defaults = Defaults::default();
        let mut value = Value::new("a", "desc", "cat").with_default("x");
        value.on_parse(Data::from("y"), &defaults);
        assert!(value.is_set());
        assert_eq!(value.get(&defaults), Some(Data::from("y")));
    }

    #[test]
    fn test_list_grammar() {
        let defaults = Defaults::default();
        let mut value = Value::list("l", "desc", "cat", vec!["https://a".into()]);
        assert!(!value.is_unique());

        value.on_parse(Data::from("=x"), &defaults);
        assert_eq!(value.get(&defaults), Some(list(&["x"])));
        value.on_parse(Data::from("+y"), &defaults);
        assert_eq!(value.get(&defaults), Some(list(&["y", "x"])));
        value.on_parse(Data::from("z"), &defaults);
        assert_eq!(value.get(&defaults), Some(list(&["y", "x", "z"])));
        value.on_parse(Data::from("="), &defaults);
        assert_eq!(value.get(&defaults), Some(list(&[])));
    }

    #[test]
    fn test_list_append_starts_from_default() {
        let defaults = Defaults::default();
        let mut value = Value::list("l", "desc", "cat", vec!["a".into()]);
        value.on_parse(Data::from("b"), &defaults);
        assert_eq!(value.get(&defaults), Some(list(&["a", "b"])));

        let mut value = Value::list("l", "desc", "cat", vec!["a".into()]);
        value.on_parse(Data::from("=b"), &defaults);
        assert_eq!(value.get(&defaults), Some(list(&["b"])));
    }

    #[test]
    fn test_copy_follows_prototype_default() {
        let mut defaults = Defaults::default();
        let mut proto = Value::new("a", "desc", "cat").with_default("one");
        proto.attach(&mut defaults);

        let mut copy = proto.create();
        assert_eq!(copy.get(&defaults), Some(Data::from("one")));

        copy.set_default(true, Some(Data::from("two")), &defaults);
        assert_eq!(proto.get(&defaults), Some(Data::from("two")));
        assert_eq!(proto.create().get(&defaults), Some(Data::from("two")));
    }

    #[test]
    fn test_set_default_without_override_detaches() {
        let mut defaults = Defaults::default();
        let mut proto = Value::new("a", "desc", "cat").with_default("one");
        proto.attach(&mut defaults);

        let mut copy = proto.create();
        copy.set_default(false, Some(Data::from("mine")), &defaults);
        assert_eq!(copy.get(&defaults), Some(Data::from("mine")));
        assert_eq!(proto.get(&defaults), Some(Data::from("one")));

        // Detached copies ignore later prototype changes.
        defaults.store(0, Some(Data::from("three")));
        assert_eq!(copy.get(&defaults), Some(Data::from("mine")));
    }

    #[test]
    fn test_description_lists_options() {
        let value = Value::new("m", "Mode.", "cat").with_options(vec![
            ValueOption::new("a", "first."),
            ValueOption::new("b", "second."),
        ]);
        assert_eq!(value.description(), "Mode.\n\na: first.\nb: second.");
    }
}
