//! Bootstrap configuration.
//!
//! Optional YAML file named by the `PDBUILD_CONFIG` environment variable.
//! Every field may be left out.
//!
//! # Example YAML
//!
//! ```yaml
//! log: pdbuild_bootstrap=debug
//! help:
//!   width: 100
//!   left_weight: 0.3
//!   right_weight: 0.7
//! ```

use std::io::BufReader;
use std::path::Path;

use pdbuild_cmdline::HelpLayout;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PDBUILD_CONFIG";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "PDBUILD_LOG";

/// Filter used when neither the environment nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Help table overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Line width; falls back to `COLUMNS`, then 80.
    pub width: Option<usize>,
    pub left_weight: Option<f64>,
    pub right_weight: Option<f64>,
}

/// Top-level bootstrap configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub help: HelpConfig,
    /// `tracing` filter directive, e.g. `debug` or `pdbuild_cmdline=trace`.
    pub log: Option<String>,
}

impl BootstrapConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::BootstrapError::IoError) if the file
    /// cannot be read, or [`YamlError`](crate::BootstrapError::YamlError)
    /// if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the default config when
    /// the variable is not set.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Help layout for the given `COLUMNS` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdbuild_bootstrap::BootstrapConfig;
    ///
    /// let config = BootstrapConfig::default();
    /// assert_eq!(config.help_layout(Some("120")).width, 120);
    /// assert_eq!(config.help_layout(Some("wide")).width, 80);
    /// assert_eq!(config.help_layout(None).width, 80);
    /// ```
    pub fn help_layout(&self, columns: Option<&str>) -> HelpLayout {
        let mut layout = HelpLayout::default();
        let columns = columns
            .and_then(|columns| columns.trim().parse::<usize>().ok())
            .filter(|&width| width > 0);
        if let Some(width) = self.help.width.or(columns) {
            layout.width = width;
        }
        if let Some(weight) = self.help.left_weight {
            layout.left_weight = weight;
        }
        if let Some(weight) = self.help.right_weight {
            layout.right_weight = weight;
        }
        layout
    }

    /// Log filter, preferring the value of [`LOG_ENV`] when given.
    pub fn log_filter(&self, env: Option<&str>) -> String {
        env.filter(|filter| !filter.trim().is_empty())
            .or(self.log.as_deref())
            .unwrap_or(DEFAULT_LOG_FILTER)
            .to_string()
    }
}
