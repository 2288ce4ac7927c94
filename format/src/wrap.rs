//! Greedy word wrapping.
//!
//! [`TextWrap`] breaks text into lines no wider than a configured maximum.
//! Every physical line starts with one of four prefixes from
//! [`WrapSettings`], chosen by two questions:
//!
//! - is this part of the first input line, or a following one?
//! - did the line start after an explicit `\n`, or because the previous
//!   line overflowed?
//!
//! When the remaining text does not fit, the wrapper tries, in order, to
//! break before the next whitespace run, to break right after a split
//! character (`,.:;?!` by default), and finally to cut the text at the
//! remaining width. The last resort only applies to a line that has no
//! content yet, so words wider than the line still make progress.
//!
//! Widths are display columns as reported by `unicode-width`, not bytes or
//! chars. A wide CJK character takes two columns, so a hard split of wide
//! text yields more lines than its char count suggests.
//!
//! # Examples
//!
//! ```
//! use pdbuild_format::{WrapSettings, wrap};
//!
//! let lines = wrap("hello world foo", 11, &WrapSettings::default());
//! assert_eq!(lines, vec!["hello world", "  foo"]);
//! ```

use serde::{Deserialize, Serialize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Characters treated as breakable whitespace by default.
pub const DEFAULT_SPACE_CHARS: &str = " ";

/// Characters after which a line may be broken by default.
pub const DEFAULT_SPLIT_CHARS: &str = ",.:;?!";

/// Prefixes and break characters used by [`TextWrap`].
///
/// The default keeps unprefixed lines and indents overflow continuations
/// by two spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapSettings {
    /// Prefix of the first physical line.
    pub first_line_prefix: String,
    /// Prefix of overflow continuations of the first input line.
    pub first_break_prefix: String,
    /// Prefix of every later input line.
    pub follow_line_prefix: String,
    /// Prefix of overflow continuations of later input lines.
    pub follow_break_prefix: String,
    /// Whitespace characters a line may break at.
    pub space_chars: String,
    /// Punctuation characters a line may break after.
    pub split_chars: String,
}

impl Default for WrapSettings {
    fn default() -> Self {
        Self::with_prefixes("", "  ", "", "  ")
    }
}

impl WrapSettings {
    /// Creates settings with explicit prefixes and the default break characters.
    pub fn with_prefixes(
        first_line: &str,
        first_break: &str,
        follow_line: &str,
        follow_break: &str,
    ) -> Self {
        Self {
            first_line_prefix: first_line.to_string(),
            first_break_prefix: first_break.to_string(),
            follow_line_prefix: follow_line.to_string(),
            follow_break_prefix: follow_break.to_string(),
            space_chars: DEFAULT_SPACE_CHARS.to_string(),
            split_chars: DEFAULT_SPLIT_CHARS.to_string(),
        }
    }

    /// Settings without any prefix.
    pub fn plain() -> Self {
        Self::with_prefixes("", "", "", "")
    }

    /// Returns a copy with `prefix` prepended to all four prefixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdbuild_format::WrapSettings;
    ///
    /// let settings = WrapSettings::default().indent("  ");
    /// assert_eq!(settings.first_line_prefix, "  ");
    /// assert_eq!(settings.first_break_prefix, "    ");
    /// assert_eq!(settings.max_indent(), 4);
    /// ```
    pub fn indent(&self, prefix: &str) -> Self {
        Self {
            first_line_prefix: format!("{prefix}{}", self.first_line_prefix),
            first_break_prefix: format!("{prefix}{}", self.first_break_prefix),
            follow_line_prefix: format!("{prefix}{}", self.follow_line_prefix),
            follow_break_prefix: format!("{prefix}{}", self.follow_break_prefix),
            space_chars: self.space_chars.clone(),
            split_chars: self.split_chars.clone(),
        }
    }

    /// Display width of the widest prefix.
    pub fn max_indent(&self) -> usize {
        [
            &self.first_line_prefix,
            &self.first_break_prefix,
            &self.follow_line_prefix,
            &self.follow_break_prefix,
        ]
        .iter()
        .map(|prefix| prefix.width())
        .max()
        .unwrap_or(0)
    }

    fn prefix(&self, first_line: bool, wrapped: bool) -> &str {
        match (first_line, wrapped) {
            (true, false) => &self.first_line_prefix,
            (true, true) => &self.first_break_prefix,
            (false, false) => &self.follow_line_prefix,
            (false, true) => &self.follow_break_prefix,
        }
    }

    fn is_space(&self, c: char) -> bool {
        self.space_chars.contains(c)
    }

    fn is_split(&self, c: char) -> bool {
        self.split_chars.contains(c)
    }
}

/// Accumulating word wrapper.
///
/// Text added through [`add_text`](TextWrap::add_text) is appended to the
/// already wrapped lines. The first-line prefixes are used until the first
/// input line is complete, across all calls.
#[derive(Debug, Clone)]
pub struct TextWrap<'a> {
    max_width: usize,
    settings: &'a WrapSettings,
    first_line: bool,
    lines: Vec<String>,
}

impl<'a> TextWrap<'a> {
    pub fn new(max_width: usize, settings: &'a WrapSettings) -> Self {
        Self {
            max_width,
            settings,
            first_line: true,
            lines: Vec::new(),
        }
    }

    /// Wraps one or more lines of text.
    ///
    /// Carriage returns are dropped and tabs count as a single space.
    pub fn add_text(&mut self, text: &str) {
        let text = text.replace('\r', "").replace('\t', " ");
        for line in text.split('\n') {
            self.add_line(line);
        }
    }

    /// Lines wrapped so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn add_line(&mut self, line: &str) {
        let settings = self.settings;
        let mut rest = line;
        let mut wrapped = false;

        loop {
            let mut buffer = settings.prefix(self.first_line, wrapped).to_string();
            let mut has_content = false;

            loop {
                let used = buffer.width();
                if used + rest.width() <= self.max_width {
                    buffer.push_str(rest);
                    self.lines.push(buffer);
                    self.first_line = false;
                    return;
                }

                let budget = self.max_width.saturating_sub(used);
                let word = self.next_word(rest);
                if !word.is_empty() && word.width() <= budget {
                    buffer.push_str(word);
                    rest = &rest[word.len()..];
                    has_content = true;
                    continue;
                }

                if let Some(chunk) = self.next_split(rest).filter(|c| c.width() <= budget) {
                    buffer.push_str(chunk);
                    rest = &rest[chunk.len()..];
                    has_content = true;
                    continue;
                }

                if !has_content {
                    let cut = hard_split(rest, budget.max(1));
                    buffer.push_str(&rest[..cut]);
                    rest = &rest[cut..];
                }
                break;
            }

            self.lines.push(buffer);
            wrapped = true;
            rest = rest.trim_start_matches(|c| settings.is_space(c));
            if rest.is_empty() {
                self.first_line = false;
                return;
            }
        }
    }

    /// Leading whitespace plus the following word, up to the next whitespace.
    fn next_word<'t>(&self, rest: &'t str) -> &'t str {
        let start = rest
            .find(|c| !self.settings.is_space(c))
            .unwrap_or(rest.len());
        let end = rest[start..]
            .find(|c| self.settings.is_space(c))
            .map_or(rest.len(), |offset| start + offset);
        &rest[..end]
    }

    /// Text up to and including the first split character.
    fn next_split<'t>(&self, rest: &'t str) -> Option<&'t str> {
        rest.char_indices()
            .find(|&(_, c)| self.settings.is_split(c))
            .map(|(index, c)| &rest[..index + c.len_utf8()])
    }
}

/// Byte offset of the longest prefix of `text` that fits into `budget`
/// columns. Always covers at least one character.
fn hard_split(text: &str, budget: usize) -> usize {
    let mut used = 0;
    for (index, c) in text.char_indices() {
        let width = c.width().unwrap_or(0);
        if index > 0 && used + width > budget {
            return index;
        }
        used += width;
    }
    text.len()
}

/// Wraps `text` into lines of at most `max_width` columns.
pub fn wrap(text: &str, max_width: usize, settings: &WrapSettings) -> Vec<String> {
    let mut wrapper = TextWrap::new(max_width, settings);
    wrapper.add_text(text);
    wrapper.into_lines()
}
