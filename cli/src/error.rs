//! Error types for the bootstrap stage.

use pdbuild_cmdline::CmdLineError;
use thiserror::Error;

/// Errors that can occur while bootstrapping a build.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The command line was rejected.
    #[error(transparent)]
    CmdLine(#[from] CmdLineError),

    /// File I/O failure, e.g. reading the config file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure of the config file.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A resolved value does not fit its setting.
    #[error("invalid setting '{key}': {value}")]
    InvalidSetting { key: String, value: String },
}

/// Hint printed after a rejected command line.
pub const HELP_HINT: &str = "run with command line argument '--help' for more information.";

impl BootstrapError {
    /// Lines reported on stderr for this error.
    ///
    /// Only a command line the user can fix gets the `--help` hint; a
    /// binding to an unregistered value is a setup bug and is reported as a
    /// plain error.
    pub fn report(&self) -> Vec<String> {
        match self {
            Self::CmdLine(err) if err.is_user_error() => vec![
                format!("invalid command line argument: {err}"),
                HELP_HINT.to_string(),
            ],
            other => vec![format!("error: {other}")],
        }
    }

    pub(crate) fn invalid(key: &str, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Convenience alias for results with [`BootstrapError`].
pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_command_line_error_gets_hint() {
        let err = BootstrapError::from(CmdLineError::UnexpectedOperand {
            index: 0,
            token: "bogus".into(),
            args: vec!["bogus".into()],
        });
        assert_eq!(
            err.report(),
            vec![
                "invalid command line argument: argument 'bogus' @0 not expected".to_string(),
                HELP_HINT.to_string(),
            ]
        );
    }

    #[test]
    fn test_unknown_value_is_reported_without_hint() {
        let err = BootstrapError::from(CmdLineError::UnknownValue {
            identifier: "general.missing".into(),
        });
        assert_eq!(
            err.report(),
            vec!["error: command line key general.missing is unknown".to_string()]
        );
    }

    #[test]
    fn test_other_errors_are_plain() {
        let err = BootstrapError::invalid("general.librarian-mode", "sometimes");
        assert_eq!(
            err.report(),
            vec!["error: invalid setting 'general.librarian-mode': sometimes".to_string()]
        );
    }
}
