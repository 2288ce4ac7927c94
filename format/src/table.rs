//! Two-column table layout on top of [`TextWrap`](crate::TextWrap).

use unicode_width::UnicodeWidthStr;

use crate::wrap::{WrapSettings, wrap};

/// Width used when no terminal width is known.
pub const DEFAULT_WIDTH: usize = 80;

/// Line-oriented formatter for plain text and two-column rows.
///
/// Every emitted line starts with the concatenation of the indent stack.
/// Lines are collected in order and handed out with
/// [`lines`](Formatter::lines) or [`into_lines`](Formatter::into_lines).
///
/// # Examples
///
/// ```
/// use pdbuild_format::{Formatter, WrapSettings};
///
/// let mut fmt = Formatter::new(20).with_columns(WrapSettings::plain(), WrapSettings::plain());
/// fmt.write_row("--flag", "enables it");
/// assert_eq!(fmt.lines(), ["--flag    enables it"]);
/// ```
#[derive(Debug, Clone)]
pub struct Formatter {
    max_width: usize,
    text: WrapSettings,
    left: WrapSettings,
    right: WrapSettings,
    left_weight: f64,
    right_weight: f64,
    indent_stack: Vec<String>,
    lines: Vec<String>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Formatter {
    /// Creates a formatter with default wrap settings and equal column weights.
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width,
            text: WrapSettings::default(),
            left: WrapSettings::default(),
            right: WrapSettings::default(),
            left_weight: 1.0,
            right_weight: 1.0,
            indent_stack: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Sets the wrap settings for plain lines.
    pub fn with_text_settings(mut self, text: WrapSettings) -> Self {
        self.text = text;
        self
    }

    /// Sets the wrap settings of the left and right table columns.
    pub fn with_columns(mut self, left: WrapSettings, right: WrapSettings) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Sets the relative column weights. Negative weights count as zero.
    pub fn with_weights(mut self, left: f64, right: f64) -> Self {
        self.left_weight = left.max(0.0);
        self.right_weight = right.max(0.0);
        self
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn push_indent(&mut self, indent: &str) {
        self.indent_stack.push(indent.to_string());
    }

    /// Removes the innermost indentation. Does nothing on an empty stack.
    pub fn pop_indent(&mut self) {
        self.indent_stack.pop();
    }

    /// Wraps `text` as plain lines inside the current indentation.
    pub fn write_line(&mut self, text: &str) {
        let indent = self.indent();
        let width = self.max_width.saturating_sub(indent.width()).max(1);
        for line in wrap(text, width, &self.text) {
            self.lines.push(format!("{indent}{line}"));
        }
    }

    /// Writes one table row.
    ///
    /// The space left after indentation and both columns' prefixes is split
    /// by the column weights, each column getting at least one character.
    /// The left column is padded so the right column starts at the same
    /// offset on every line of this row.
    pub fn write_row(&mut self, left: &str, right: &str) {
        let indent = self.indent();
        let left_indent = self.left.max_indent();
        let right_indent = self.right.max_indent();
        let (left_width, right_width) = self.column_widths(indent.width() + left_indent + right_indent);

        let left_lines = wrap(left, left_width + left_indent, &self.left);
        let right_lines = wrap(right, right_width + right_indent, &self.right);
        let boundary = left_width + left_indent;

        for row in 0..left_lines.len().max(right_lines.len()) {
            let l = left_lines.get(row).map_or("", String::as_str);
            let r = right_lines.get(row).map_or("", String::as_str);
            let padding = " ".repeat(boundary.saturating_sub(l.width()));
            self.lines.push(format!("{indent}{l}{padding}{r}"));
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn indent(&self) -> String {
        self.indent_stack.concat()
    }

    fn column_widths(&self, reserved: usize) -> (usize, usize) {
        let available = self.max_width.saturating_sub(reserved).max(1);
        let total = self.left_weight + self.right_weight;
        let ratio = if total > 0.0 {
            self.left_weight / total
        } else {
            0.5
        };
        let left = (available as f64 * ratio) as usize;
        let right = available.saturating_sub(left);
        (left.max(1), right.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(width: usize) -> Formatter {
        Formatter::new(width)
            .with_text_settings(WrapSettings::plain())
            .with_columns(WrapSettings::plain(), WrapSettings::plain())
    }

    #[test]
    fn test_write_line_applies_indent_stack() {
        let mut fmt = plain(20);
        fmt.push_indent("> ");
        fmt.push_indent("- ");
        fmt.write_line("item");
        fmt.pop_indent();
        fmt.write_line("back");
        fmt.pop_indent();
        fmt.pop_indent();
        fmt.write_line("top");
        assert_eq!(fmt.lines(), ["> - item", "> back", "top"]);
    }

    #[test]
    fn test_write_line_wraps_inside_indent() {
        let mut fmt = plain(8);
        fmt.push_indent("  ");
        fmt.write_line("aaa bbb ccc");
        assert_eq!(fmt.lines(), ["  aaa", "  bbb", "  ccc"]);
    }

    #[test]
    fn test_row_height_is_taller_column() {
        let mut fmt = plain(20).with_weights(1.0, 1.0);
        fmt.write_row("left", "one two three four");
        assert_eq!(
            fmt.lines(),
            ["left      one two", "          three four"]
        );
    }

    #[test]
    fn test_row_pads_shorter_right_column() {
        let mut fmt = plain(20);
        fmt.write_row("aaaa bbbb cccc", "x");
        assert_eq!(fmt.lines(), ["aaaa bbbb x", "cccc      "]);
    }

    #[test]
    fn test_weights_split_available_width() {
        let fmt = plain(100).with_weights(0.4, 0.6);
        assert_eq!(fmt.column_widths(0), (40, 60));
        assert_eq!(fmt.column_widths(10), (36, 54));
    }

    #[test]
    fn test_column_floor_is_one() {
        let fmt = plain(3).with_weights(0.0, 1.0);
        assert_eq!(fmt.column_widths(10), (1, 1));
    }

    #[test]
    fn test_column_prefix_widths_are_reserved() {
        let left = WrapSettings::plain().indent("  ");
        let right = WrapSettings::plain().indent("  ");
        let mut fmt = Formatter::new(24).with_columns(left, right);
        fmt.write_row("--a", "desc");
        // 24 - 4 reserved = 20, split 10/10; left boundary is 10 + 2.
        assert_eq!(fmt.lines(), ["  --a         desc"]);
    }
}
