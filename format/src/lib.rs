//! Text layout for terminal help and diagnostics.
//!
//! - [`TextWrap`] / [`wrap`]: greedy word wrapping with separate prefixes for
//!   the first line, later lines, and overflow continuations.
//! - [`Formatter`]: plain lines and two-column rows with weighted column
//!   widths and an indent stack.
//!
//! # Example
//!
//! ```
//! use pdbuild_format::{Formatter, WrapSettings};
//!
//! let mut fmt = Formatter::new(40)
//!     .with_columns(WrapSettings::default().indent("  "), WrapSettings::default().indent("  "))
//!     .with_weights(0.4, 0.6);
//! fmt.write_line("General:");
//! fmt.write_row("--verbose", "Print every step.");
//! assert_eq!(fmt.lines().len(), 2);
//! assert!(fmt.lines()[1].starts_with("  --verbose"));
//! ```

mod table;
mod wrap;

pub use table::{DEFAULT_WIDTH, Formatter};
pub use wrap::{DEFAULT_SPACE_CHARS, DEFAULT_SPLIT_CHARS, TextWrap, WrapSettings, wrap};
