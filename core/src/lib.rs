//! Command line model and parser for the pdbuild build driver.
//!
//! A [`Registry`] holds the catalog of the build:
//!
//! - [`Value`]: a named, typed parameter with a default, a category for
//!   help output and optional restrictions (required, unique, options).
//! - [`Argument`]: a switch spelling bound to a value, deciding how many
//!   operands it takes and what it writes.
//!
//! Every parse works on a [`Context`], a fresh working copy of all values.
//! Unset values resolve to the registry's shared default, so a default
//! changed on the registry is seen by every context.
//!
//! The [`Parser`] scans tokens of the form `--switch [operand...]`,
//! validates each occurrence and reports the first problem as a
//! [`CmdLineError`]. [`Registry::render_help`] lays the catalog out as a
//! two-column table through `pdbuild-format`.
//!
//! # Example
//!
//! ```
//! use pdbuild_cmdline::*;
//!
//! let mut registry = Registry::new();
//! registry.add_value(
//!     Value::new("general.librarian.mode", "Checkout strategy.", "General:")
//!         .with_default("update")
//!         .with_options(vec![
//!             ValueOption::new("fetch", "fetch missing dependencies."),
//!             ValueOption::new("update", "update clean repositories."),
//!         ]),
//! );
//! registry.add_argument(Argument::text("general.librarian.mode", "librarian-mode", "<mode>"));
//! assert!(registry.validate().is_empty());
//!
//! let context = Parser::new(&registry, ["--librarian-mode", "fetch"]).parse().unwrap();
//! assert_eq!(context.resolve_text("general.librarian.mode").as_deref(), Some("fetch"));
//!
//! let err = Parser::new(&registry, ["--librarian-mode", "bogus"]).parse().unwrap_err();
//! assert!(matches!(err, CmdLineError::InvalidOption { .. }));
//! ```

mod argument;
mod context;
mod error;
mod help;
mod parser;
mod registry;
mod validate;
mod value;

pub use argument::{Argument, Invocation};
pub use context::Context;
pub use error::{CmdLineError, Result};
pub use help::HelpLayout;
pub use parser::{ParseOptions, Parser, SWITCH_MARKER, parse, usage_of};
pub use registry::Registry;
pub use validate::RegistryIssue;
pub use value::{Data, Defaults, Value, ValueKind, ValueOption};
