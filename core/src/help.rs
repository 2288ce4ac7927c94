//! Help text for a registry.

use pdbuild_format::{DEFAULT_WIDTH, Formatter, WrapSettings};
use serde::{Deserialize, Serialize};

use crate::argument::format_usages;
use crate::registry::Registry;
use crate::value::Value;

/// Table layout of the help output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpLayout {
    /// Total line width.
    pub width: usize,
    /// Relative width of the switch column.
    pub left_weight: f64,
    /// Relative width of the description column.
    pub right_weight: f64,
    /// Indentation of both columns.
    pub column_indent: String,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            left_weight: 0.4,
            right_weight: 0.6,
            column_indent: "  ".to_string(),
        }
    }
}

impl HelpLayout {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn formatter(&self) -> Formatter {
        let column = WrapSettings::default().indent(&self.column_indent);
        Formatter::new(self.width)
            .with_columns(column.clone(), column)
            .with_weights(self.left_weight, self.right_weight)
    }
}

impl Registry {
    /// Renders the help table.
    ///
    /// Categories are listed in the order their first value was
    /// registered; values without any binding are left out, and so are
    /// categories left empty by that. Each value is one row of its switch
    /// usages and its [`description`](Value::description).
    ///
    /// # Examples
    ///
    /// ```
    /// use pdbuild_cmdline::{Argument, HelpLayout, Registry, Value};
    ///
    /// let mut registry = Registry::new();
    /// registry.add_value(Value::new("general.help", "Show help.", "General:"));
    /// registry.add_argument(Argument::flag("general.help", "help"));
    ///
    /// let lines = registry.render_help(&HelpLayout::default());
    /// assert_eq!(lines[0], "");
    /// assert_eq!(lines[1], "General:");
    /// assert!(lines[2].starts_with("  --help "));
    /// assert!(lines[2].ends_with("  Show help."));
    /// ```
    pub fn render_help(&self, layout: &HelpLayout) -> Vec<String> {
        let mut formatter = layout.formatter();

        for (index, (category, values)) in self.help_categories().into_iter().enumerate() {
            if index == 0 {
                formatter.write_line("");
            }
            formatter.write_line(category);
            for (row, value) in values.into_iter().enumerate() {
                if row > 0 {
                    formatter.write_line("");
                }
                let usages = format_usages(self.arguments_for(value.identifier()));
                formatter.write_row(&usages, &value.description());
            }
        }

        formatter.into_lines()
    }

    /// Bound values grouped by category, in first-registration order.
    fn help_categories(&self) -> Vec<(&str, Vec<&Value>)> {
        let mut categories: Vec<(&str, Vec<&Value>)> = Vec::new();
        for value in self.values() {
            if self.arguments_for(value.identifier()).next().is_none() {
                continue;
            }
            match categories
                .iter()
                .position(|(category, _)| *category == value.category())
            {
                Some(index) => categories[index].1.push(value),
                None => categories.push((value.category(), vec![value])),
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argument, ValueOption};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_value(Value::new("help", "Show help.", "General:"));
        registry.add_argument(Argument::flag("help", "help"));
        registry.add_value(Value::new("hidden", "Not bound.", "Hidden:"));
        registry.add_value(Value::new("ws", "Workspace.", "Paths:"));
        registry.add_argument(Argument::text("ws", "workspace", "<dir>"));
        registry.add_argument(Argument::text("ws", "ws", "<dir>"));
        registry.add_value(Value::new("verbose", "Verbose.", "General:"));
        registry.add_argument(Argument::flag("verbose", "verbose"));
        registry
    }

    fn row(left: &str, right: &str) -> String {
        // 80 columns minus 4 + 4 prefix columns, split 28/44; boundary 32.
        format!("{left:<32}{right}")
    }

    #[test]
    fn test_render_help_groups_categories() {
        let lines = registry().render_help(&HelpLayout::default());
        assert_eq!(
            lines,
            vec![
                String::new(),
                "General:".to_string(),
                row("  --help", "  Show help."),
                String::new(),
                row("  --verbose", "  Verbose."),
                "Paths:".to_string(),
                row("  --workspace <dir>, --ws <dir>", "  Workspace."),
            ]
        );
    }

    #[test]
    fn test_render_help_empty_registry() {
        assert!(Registry::new().render_help(&HelpLayout::default()).is_empty());
    }

    #[test]
    fn test_render_help_lists_options() {
        let mut registry = Registry::new();
        registry.add_value(
            Value::new("mode", "Mode.", "General:").with_options(vec![
                ValueOption::new("fetch", "fetch."),
                ValueOption::new("update", "update."),
            ]),
        );
        registry.add_argument(Argument::text("mode", "mode", "<mode>"));

        let lines = registry.render_help(&HelpLayout::default());
        assert_eq!(lines.len(), 2 + 4);
        assert!(lines[2].ends_with("  Mode."));
        assert!(lines[4].ends_with("  fetch: fetch."));
        assert!(lines[5].ends_with("  update: update."));
    }

    #[test]
    fn test_layout_deserializes_with_defaults() {
        let layout: HelpLayout = serde_json::from_str(r#"{"width": 60}"#).unwrap();
        assert_eq!(layout, HelpLayout::default().with_width(60));
    }
}
