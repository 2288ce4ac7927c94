//! Bootstrap stage of the pdbuild build driver.
//!
//! Registers the global build switches ([`global_args`]), parses the
//! command line in tolerant mode and derives the build directories
//! ([`Bootstrapper`]). Help output and logging are configured through an
//! optional YAML file ([`BootstrapConfig`]).

mod bootstrap;
mod config;
mod error;
pub mod global_args;

pub use bootstrap::{Bootstrapper, LibrarianMode, Outcome, Settings};
pub use config::{BootstrapConfig, CONFIG_ENV, DEFAULT_LOG_FILTER, HelpConfig, LOG_ENV};
pub use error::{BootstrapError, HELP_HINT, Result};
pub use global_args::GlobalArgs;
